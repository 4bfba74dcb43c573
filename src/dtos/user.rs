//! User DTOs - Data Transfer Objects per utenti

use crate::entities::{User, normalize_email};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref HAS_LETTER: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref HAS_DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub is_staff: Option<bool>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: Some(value.id),
            email: Some(value.email),
            is_staff: Some(value.is_staff),
            password: None, // mai esposta al client!!!
        }
    }
}

/// DTO per creare un nuovo utente (senza id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

impl CreateUserDTO {
    /// Restituisce il DTO con l'email normalizzata
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    /// Almeno una lettera e una cifra
    pub fn has_strong_password(&self) -> bool {
        HAS_LETTER.is_match(&self.password) && HAS_DIGIT.is_match(&self.password)
    }
}

/// DTO per il login: lo username è l'email
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
}
