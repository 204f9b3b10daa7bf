/// 時計ポート
///
/// 出版年の範囲検証で使う「現在年」を提供する。
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}
