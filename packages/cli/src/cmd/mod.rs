pub mod create;
pub mod delete;
pub mod edit;
pub mod items;
pub mod view;
