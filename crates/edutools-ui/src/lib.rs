//! Educator Tools UI: the contract between dialogs and the host.
//!
//! Dialog builders in `edutools-scenes` reduce every form to a plain
//! [`FormView`]. The host renders it through a [`FormPresenter`] and answers
//! with a [`FormResponse`].

pub mod presenter;
pub mod response;
pub mod view;

pub use presenter::FormPresenter;
pub use response::{FieldValue, FormResponse};
pub use view::{
    ActionView, ButtonView, FieldView, FormView, MessageView, ModalView, check_slider_value,
    title_key,
};
