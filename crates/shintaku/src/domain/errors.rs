//! Domain Errors
//!
//! The closed error taxonomy for the reading pipeline. Every failure
//! cause (network, auth, quota, validation, timeout, parse, ...) is
//! classified into exactly one `ErrorKind` with a fixed retryability
//! and a localized user-facing message; no ad hoc categories exist
//! outside this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::Language;

/// Failure classification. Retryability is a property of the kind,
/// never of the individual error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// DNS/connection failure
    NetworkError,
    /// Missing or invalid upstream credential
    ApiKeyMissing,
    /// Upstream or local rate-limit signal
    ApiRateLimit,
    /// Daily/plan quota exhausted
    ApiQuotaExceeded,
    /// Client-side validation failure
    InvalidRequest,
    /// Upstream 5xx
    ServerError,
    /// Operation exceeded its time budget
    TimeoutError,
    /// Malformed or incomplete response body
    ParseError,
    /// Anything unmatched; retried as a conservative default
    UnknownError,
}

impl ErrorKind {
    /// Whether an error of this kind is worth retrying.
    pub fn is_retryable(self) -> bool {
        match self {
            ErrorKind::NetworkError
            | ErrorKind::ApiRateLimit
            | ErrorKind::ServerError
            | ErrorKind::TimeoutError
            | ErrorKind::UnknownError => true,
            ErrorKind::ApiKeyMissing
            | ErrorKind::ApiQuotaExceeded
            | ErrorKind::InvalidRequest
            | ErrorKind::ParseError => false,
        }
    }

    /// Localized user-facing message for this kind.
    pub fn user_message(self, language: Language) -> &'static str {
        match language {
            Language::Ja => match self {
                ErrorKind::NetworkError => "インターネット接続を確認してください",
                ErrorKind::ApiKeyMissing => "設定エラーが発生しました。しばらくお待ちください",
                ErrorKind::ApiRateLimit => {
                    "アクセスが集中しています。少し時間を置いてからお試しください"
                }
                ErrorKind::ApiQuotaExceeded => {
                    "本日の利用上限に達しました。明日再度お試しください"
                }
                ErrorKind::InvalidRequest => {
                    "リクエストに問題があります。ページを更新してお試しください"
                }
                ErrorKind::ServerError => "サーバーに一時的な問題が発生しています",
                ErrorKind::TimeoutError => "タイムアウトしました。もう一度お試しください",
                ErrorKind::ParseError => "応答の解析に失敗しました",
                ErrorKind::UnknownError => "予期しないエラーが発生しました",
            },
            Language::En => match self {
                ErrorKind::NetworkError => "Please check your internet connection",
                ErrorKind::ApiKeyMissing => "Configuration error occurred. Please wait a moment",
                ErrorKind::ApiRateLimit => "Too many requests. Please try again in a moment",
                ErrorKind::ApiQuotaExceeded => "Daily usage limit reached. Please try again tomorrow",
                ErrorKind::InvalidRequest => "Request error. Please refresh the page and try again",
                ErrorKind::ServerError => "Server is temporarily unavailable",
                ErrorKind::TimeoutError => "Request timed out. Please try again",
                ErrorKind::ParseError => "Failed to parse response",
                ErrorKind::UnknownError => "An unexpected error occurred",
            },
            Language::Es => match self {
                ErrorKind::NetworkError => "Por favor verifica tu conexión a internet",
                ErrorKind::ApiKeyMissing => "Error de configuración. Por favor espera un momento",
                ErrorKind::ApiRateLimit => "Demasiadas solicitudes. Intenta de nuevo en un momento",
                ErrorKind::ApiQuotaExceeded => "Límite diario alcanzado. Intenta mañana",
                ErrorKind::InvalidRequest => {
                    "Error en la solicitud. Actualiza la página e intenta de nuevo"
                }
                ErrorKind::ServerError => "El servidor no está disponible temporalmente",
                ErrorKind::TimeoutError => "Tiempo de espera agotado. Intenta de nuevo",
                ErrorKind::ParseError => "Error al procesar la respuesta",
                ErrorKind::UnknownError => "Ocurrió un error inesperado",
            },
            Language::Fr => match self {
                ErrorKind::NetworkError => "Veuillez vérifier votre connexion internet",
                ErrorKind::ApiKeyMissing => "Erreur de configuration. Veuillez patienter",
                ErrorKind::ApiRateLimit => "Trop de requêtes. Réessayez dans un moment",
                ErrorKind::ApiQuotaExceeded => "Limite quotidienne atteinte. Réessayez demain",
                ErrorKind::InvalidRequest => {
                    "Erreur de requête. Actualisez la page et réessayez"
                }
                ErrorKind::ServerError => "Le serveur est temporairement indisponible",
                ErrorKind::TimeoutError => "Délai d'attente dépassé. Réessayez",
                ErrorKind::ParseError => "Échec de l'analyse de la réponse",
                ErrorKind::UnknownError => "Une erreur inattendue s'est produite",
            },
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorKind::ApiKeyMissing => write!(f, "API_KEY_MISSING"),
            ErrorKind::ApiRateLimit => write!(f, "API_RATE_LIMIT"),
            ErrorKind::ApiQuotaExceeded => write!(f, "API_QUOTA_EXCEEDED"),
            ErrorKind::InvalidRequest => write!(f, "INVALID_REQUEST"),
            ErrorKind::ServerError => write!(f, "SERVER_ERROR"),
            ErrorKind::TimeoutError => write!(f, "TIMEOUT_ERROR"),
            ErrorKind::ParseError => write!(f, "PARSE_ERROR"),
            ErrorKind::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

/// A classified pipeline error. `detail` is internal diagnostic text
/// for logs; user-facing copy comes from [`ErrorKind::user_message`]
/// and never leaks the detail string.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {detail}")]
pub struct OracleError {
    pub kind: ErrorKind,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

impl OracleError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, detail)
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    pub fn user_message(&self, language: Language) -> &'static str {
        self.kind.user_message(language)
    }

    /// Classify an HTTP status code, local or upstream.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let kind = match status {
            401 => ErrorKind::ApiKeyMissing,
            403 => ErrorKind::ApiQuotaExceeded,
            429 => ErrorKind::ApiRateLimit,
            400..=499 => ErrorKind::InvalidRequest,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::UnknownError,
        };
        Self::new(kind, detail)
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(ErrorKind::TimeoutError, err.to_string());
        }
        if err.is_connect() {
            return Self::new(ErrorKind::NetworkError, err.to_string());
        }
        if err.is_decode() {
            return Self::new(ErrorKind::ParseError, err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), err.to_string());
        }
        Self::new(ErrorKind::UnknownError, err.to_string())
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::ParseError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_is_fixed_per_kind() {
        assert!(ErrorKind::NetworkError.is_retryable());
        assert!(ErrorKind::ApiRateLimit.is_retryable());
        assert!(ErrorKind::ServerError.is_retryable());
        assert!(ErrorKind::TimeoutError.is_retryable());
        assert!(ErrorKind::UnknownError.is_retryable());
        assert!(!ErrorKind::ApiKeyMissing.is_retryable());
        assert!(!ErrorKind::ApiQuotaExceeded.is_retryable());
        assert!(!ErrorKind::InvalidRequest.is_retryable());
        assert!(!ErrorKind::ParseError.is_retryable());
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            OracleError::from_status(401, "").kind,
            ErrorKind::ApiKeyMissing
        );
        assert_eq!(
            OracleError::from_status(403, "").kind,
            ErrorKind::ApiQuotaExceeded
        );
        assert_eq!(
            OracleError::from_status(429, "").kind,
            ErrorKind::ApiRateLimit
        );
        assert_eq!(
            OracleError::from_status(400, "").kind,
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            OracleError::from_status(500, "").kind,
            ErrorKind::ServerError
        );
        assert_eq!(
            OracleError::from_status(503, "").kind,
            ErrorKind::ServerError
        );
        assert_eq!(
            OracleError::from_status(302, "").kind,
            ErrorKind::UnknownError
        );
    }

    #[test]
    fn serde_json_errors_classify_as_parse() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let classified = OracleError::from(err);
        assert_eq!(classified.kind, ErrorKind::ParseError);
        assert!(!classified.is_retryable());
    }

    #[test]
    fn user_messages_are_localized() {
        let err = OracleError::new(ErrorKind::NetworkError, "ENOTFOUND");
        assert_eq!(
            err.user_message(Language::En),
            "Please check your internet connection"
        );
        assert_eq!(
            err.user_message(Language::Ja),
            "インターネット接続を確認してください"
        );
        assert_eq!(
            err.user_message(Language::Fr),
            "Veuillez vérifier votre connexion internet"
        );
    }

    #[test]
    fn display_uses_stable_error_codes() {
        assert_eq!(ErrorKind::ApiRateLimit.to_string(), "API_RATE_LIMIT");
        let err = OracleError::new(ErrorKind::TimeoutError, "deadline exceeded");
        assert_eq!(err.to_string(), "TIMEOUT_ERROR: deadline exceeded");
    }
}
