pub mod login_user_dto;
pub mod register_user_dto;
pub mod update_profile_dto;
