pub mod admin_dto;
pub mod application_dto;
pub mod blog_dto;
pub mod contact_dto;
pub mod site_dto;
pub mod subscription_dto;
pub mod vacancy_dto;
