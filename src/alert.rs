//! Alert boxes for showing the outcome of a request to the user.
//!
//! Alerts are used both for the price check result and for errors that are
//! swapped into the page's alert container.

use maud::{Markup, html};

/// A message shown to the user, styled by how it should be read.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something worked, e.g. a price was found.
    Success { message: String, details: String },
    /// A neutral outcome that is not a failure.
    Info { message: String, details: String },
    /// Something went wrong.
    Error { message: String, details: String },
}

const ALERT_BASE_STYLE: &str = "mt-6 p-4 rounded-xl border flex flex-col gap-1 text-sm";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (
                "bg-green-50 border-green-200 text-green-800 \
                dark:bg-green-900 dark:border-green-700 dark:text-green-100",
                message,
                details,
            ),
            Alert::Info { message, details } => (
                "bg-blue-50 border-blue-200 text-blue-800 \
                dark:bg-blue-900 dark:border-blue-700 dark:text-blue-100",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "bg-red-50 border-red-200 text-red-700 \
                dark:bg-red-900 dark:border-red-700 dark:text-red-100",
                message,
                details,
            ),
        };

        html! {
            div role="alert" class={ (ALERT_BASE_STYLE) " " (style) }
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="font-bold text-lg" { (details) }
                }
            }
        }
    }
}
