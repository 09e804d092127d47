// ==========================================
// Capacidade dos CDs - camada de API
// ==========================================
// Ponto de entrada para quem envia arquivos (CLI / servidor)
// ==========================================

pub mod capacity_api;
pub mod error;

pub use capacity_api::{parse_day, ApiResponse, CapacityApi, DailyData, UploadedFile};
pub use error::{ApiError, ApiResult};
