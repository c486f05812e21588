//! Localized text for the login page and its notifications

use std::str::FromStr;

use crate::error::AuthError;

/// Languages the login page can be rendered in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    /// Text direction of the locale, usable as the html `dir` attribute
    pub const fn direction(self) -> &'static str {
        match self {
            Self::Arabic => "rtl",
            Self::English => "ltr",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Arabic),
            "en" => Ok(Self::English),
            _ => Err(AuthError::UnsupportedLocale(s.to_owned())),
        }
    }
}

/// Static text rendered around the credential inputs
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub username: &'static str,
    pub username_placeholder: &'static str,
    pub password: &'static str,
    pub password_placeholder: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub footer: &'static str,
}

const ARABIC_LABELS: Labels = Labels {
    title: "نظام إدارة المخزون",
    subtitle: "تسجيل الدخول للمتابعة",
    username: "اسم المستخدم",
    username_placeholder: "أدخل اسم المستخدم",
    password: "كلمة المرور",
    password_placeholder: "أدخل كلمة المرور",
    submit: "تسجيل الدخول",
    submitting: "جاري الدخول...",
    footer: "نظام إدارة المخزون v1.0",
};

const ENGLISH_LABELS: Labels = Labels {
    title: "Inventory Management System",
    subtitle: "Sign in to continue",
    username: "Username",
    username_placeholder: "Enter your username",
    password: "Password",
    password_placeholder: "Enter your password",
    submit: "Sign in",
    submitting: "Signing in...",
    footer: "Inventory Management System v1.0",
};

impl Labels {
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::Arabic => &ARABIC_LABELS,
            Locale::English => &ENGLISH_LABELS,
        }
    }

    /// Label of the submit control for the current submission state
    pub const fn submit_label(&self, submitting: bool) -> &'static str {
        if submitting {
            self.submitting
        } else {
            self.submit
        }
    }
}

/// Transient, user visible notification raised by a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Username or password was blank
    MissingCredentials,
    /// The backend could not be reached or did not accept the credentials
    LoginFailed { detail: String },
}

impl Notice {
    pub const fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::MissingCredentials, Locale::Arabic) => "يرجى إدخال اسم المستخدم وكلمة المرور",
            (Self::MissingCredentials, Locale::English) => "Please enter your username and password",
            (Self::LoginFailed { .. }, Locale::Arabic) => "خطأ في تسجيل الدخول",
            (Self::LoginFailed { .. }, Locale::English) => "Login failed",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::MissingCredentials => None,
            Self::LoginFailed { detail } => Some(detail),
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCredentials)
    }
}

impl From<&AuthError> for Notice {
    fn from(error: &AuthError) -> Self {
        match error {
            AuthError::MissingCredentials => Self::MissingCredentials,
            _ => Self::LoginFailed {
                detail: error.to_string(),
            },
        }
    }
}
