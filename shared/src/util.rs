/// 获取当前 UTC 时间戳（秒）
///
/// All `created_at` / `modified_at` / `deleted_at` columns use this unit.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
