pub mod decorators;
pub mod dispatcher;
pub mod registration;

#[cfg(test)]
pub(crate) mod test_support;

pub use decorators::{AuthorizationCommandDecorator, AuthorizationQueryDecorator};
pub use dispatcher::Dispatcher;
pub use registration::AuthorizationDecoration;
