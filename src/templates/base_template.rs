use crate::models::{FlashMessage, User};

/// Common properties every page template carries for `base.html`.
pub trait BaseTemplate {
    fn current_user(&self) -> &Option<User>;
    fn flash_messages(&self) -> &Vec<FlashMessage>;
    fn has_flash_messages(&self) -> bool;
}

/// Macro to implement BaseTemplate for a struct with standard fields
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn current_user(&self) -> &Option<$crate::models::User> {
                &self.current_user
            }
            fn flash_messages(&self) -> &Vec<$crate::models::FlashMessage> {
                &self.flash_messages
            }
            fn has_flash_messages(&self) -> bool {
                self.has_flash_messages
            }
        }
    };
}
