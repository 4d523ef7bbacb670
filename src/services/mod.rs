pub mod carousel_service;
pub mod config_service;
pub mod media_service;
pub mod slide_service;
pub mod storage_service;
pub mod widget_service;
