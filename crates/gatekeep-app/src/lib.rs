// Application layer - Authorization decorators, registration and dispatch

pub mod application;
pub mod presentation;

pub use application::{
    AuthorizationCommandDecorator, AuthorizationDecoration, AuthorizationQueryDecorator,
    Dispatcher,
};
pub use presentation::ErrorResponse;
