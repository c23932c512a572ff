pub mod generation_dto;
pub mod results_dto;
