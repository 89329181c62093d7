pub mod navbar;
pub mod notice_banner;
pub mod project_card;
pub mod project_form;
pub mod tag_input;
