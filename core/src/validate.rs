// Backoffice
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Pure validation routines for form input.
//!
//! Every check evaluates its rules in a fixed order and returns on the first failure, so
//! only one message is ever surfaced for a given input.  The messages are the user-facing
//! strings shown by the frontend, in Portuguese, and changing them changes what the user
//! sees; the rule ordering is part of the contract too.

use crate::model::{ModelError, ModelResult};
use regex::Regex;
use std::sync::LazyLock;
use time::{Date, Month, OffsetDateTime};

/// Pattern for a plausible email address: a restricted local part, a dot-separated domain
/// and a trailing TLD of two or more letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Hardcoded regex must be valid")
});

/// Pattern for an expiration date in `dd/mm/yyyy` form.  Matching this pattern says nothing
/// about the date being a real calendar date.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("Hardcoded regex must be valid")
});

/// Checks the email and password of the login form.
pub fn check_login(email: &str, password: &str) -> ModelResult<()> {
    if email.is_empty() {
        return Err(ModelError("Deve ser informado o e-mail".to_owned()));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ModelError("Informe um e-mail válido".to_owned()));
    }
    if password.is_empty() {
        return Err(ModelError("Deve ser informado uma senha".to_owned()));
    }
    Ok(())
}

/// Checks the email of the password reset form.
pub fn check_reset(email: &str) -> ModelResult<()> {
    if email.is_empty() {
        return Err(ModelError("Campo de e-mail não pode ser vazio".to_owned()));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ModelError("O e-mail não é válido".to_owned()));
    }
    Ok(())
}

/// Checks a new password and its confirmation.
///
/// The length and equality rules apply to the trimmed inputs, so surrounding whitespace
/// neither helps reach the minimum length nor breaks the comparison.
pub fn check_password(password: &str, confirm: &str) -> ModelResult<()> {
    if password.is_empty() {
        return Err(ModelError("Deve ser informado uma senha".to_owned()));
    }
    if password.trim().len() < 8 {
        return Err(ModelError("A senha deve conter pelo menos 8 caracteres".to_owned()));
    }
    if password.trim() != confirm.trim() {
        return Err(ModelError("As senhas devem ser iguais".to_owned()));
    }
    Ok(())
}

/// Checks the price field of the subscription form.
pub fn check_subscription_price(price: &str) -> ModelResult<()> {
    if price.trim().is_empty() {
        return Err(ModelError("O preço não pode ser vazio".to_owned()));
    }
    let value = match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(ModelError("O preço deve ser um número válido".to_owned())),
    };
    if value < 0.0 {
        return Err(ModelError("O preço não pode ser negativo".to_owned()));
    }
    if value == 0.0 {
        return Err(ModelError("O preço deve ser maior que R$ 0,00".to_owned()));
    }
    Ok(())
}

/// Input of the coupon form as typed by the administrator.
///
/// `discount` and `expiration` only participate in validation when their corresponding
/// `has_*` toggle is on, mirroring the optional sections of the form.
#[derive(Clone, Debug, Default)]
pub struct CouponForm {
    /// Display name of the coupon.
    pub name: String,

    /// Redemption code of the coupon.
    pub code: String,

    /// Whether the coupon grants a discount.
    pub has_discount: bool,

    /// Discount percentage; only meaningful when `has_discount` is set.
    pub discount: f64,

    /// Whether the coupon expires.
    pub has_expiration: bool,

    /// Expiration date in `dd/mm/yyyy` form; only meaningful when `has_expiration` is set.
    pub expiration: String,
}

/// Parses a `dd/mm/yyyy` string that already matched `DATE_RE` into a calendar date.
fn parse_expiration(day: u8, month: u8, year: i32) -> Option<Date> {
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Checks the coupon form.
///
/// The expiration date must be at least one full day ahead of `now`, which callers obtain
/// from their [`Clock`](crate::clocks::Clock).
pub fn check_coupon(form: &CouponForm, now: OffsetDateTime) -> ModelResult<()> {
    if form.name.is_empty() {
        return Err(ModelError("Deve ser informado o nome do cupom".to_owned()));
    }
    if form.code.is_empty() {
        return Err(ModelError("Deve ser informado o código do cupom".to_owned()));
    }
    if form.code.len() <= 5 {
        return Err(ModelError("O código do cupom deve conter mais de 5 caracteres".to_owned()));
    }
    if form.has_discount && (form.discount <= 0.0 || form.discount > 100.0) {
        return Err(ModelError("Deve ser informado desconto maior que 0% até 100%".to_owned()));
    }
    if form.has_expiration {
        let captures = match DATE_RE.captures(&form.expiration) {
            Some(captures) => captures,
            None => {
                return Err(ModelError(
                    "A data de expiração deve estar no formato dd/mm/yyyy".to_owned(),
                ));
            }
        };

        // The unwraps cannot fire: the groups matched \d{2} and \d{4} above.
        let day = captures[1].parse::<u8>().unwrap();
        let month = captures[2].parse::<u8>().unwrap();
        let year = captures[3].parse::<i32>().unwrap();

        let date = match parse_expiration(day, month, year) {
            Some(date) => date,
            None => {
                return Err(ModelError(
                    "Informe uma data de expiração válida no formato dd/mm/yyyy".to_owned(),
                ));
            }
        };

        if date <= now.date() {
            return Err(ModelError(
                "A data de expiração deve ser no mínimo um dia à frente da data atual".to_owned(),
            ));
        }
    }
    Ok(())
}

/// Formats a raw numeric string as a Brazilian Real amount, such as `R$ 1.234,56`.
///
/// Returns a fixed placeholder when the input does not parse as a number.
pub fn format_brl(value: &str) -> String {
    let value = match value.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return "Valor inválido".to_owned(),
    };

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}
