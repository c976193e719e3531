pub mod rental_repository;
pub mod user_repository;
pub mod vehicle_repository;

/// Normaliza page/per_page y calcula el offset (per_page por defecto 10)
pub(crate) fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(10).clamp(1, 50);
    (page, per_page, (page - 1) * per_page)
}
