// HTML presentation layer: the profile form and the three-panel plan page.

pub mod handlers;
pub mod html;
pub mod pages;
