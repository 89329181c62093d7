pub mod auth;
pub mod contact;
pub mod home;
pub mod profile;
pub mod update_project;
pub mod upload;
pub mod view_project;
