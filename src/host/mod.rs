//! Host collaborators
//!
//! The page controller does not own menus, translations, escaping or the request. The host
//! supplies them through these traits and types:
//! - **Translation**: [`Translator`] ([`Untranslated`], [`Catalog`])
//! - **Escaping**: [`Escaper`] ([`HtmlEscaper`])
//! - **Menus**: [`MenuRegistrar`] ([`MenuRecorder`])
//! - **Requests**: [`PageRequest`], [`SubmitRequest`], [`Caller`]

mod i18n;
mod menu;
mod request;

pub use i18n::{Catalog, Escaper, HtmlEscaper, Translator, Untranslated};
pub use menu::{MenuPage, MenuRecorder, MenuRegistrar};
pub use request::{Caller, PageRequest, SubmitRequest};
