use crate::utils::error::{Diy99Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use url::{Host, Url};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 與遠端一致：沒有 scheme 的位址（如 `www.example.com/1.jpg`）視為 http
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(Diy99Error::validation(field_name, "URL cannot be empty"));
    }

    let candidate: Cow<'_, str> = if url_str.contains("://") {
        Cow::Borrowed(url_str)
    } else {
        Cow::Owned(format!("http://{}", url_str))
    };

    match Url::parse(&candidate) {
        Ok(url) => {
            match url.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(Diy99Error::validation(
                        field_name,
                        format!("Unsupported URL scheme: {}", scheme),
                    ))
                }
            }
            match url.host() {
                Some(Host::Domain(domain)) if domain.contains('.') || domain == "localhost" => {
                    Ok(())
                }
                Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
                _ => Err(Diy99Error::validation(
                    field_name,
                    format!("URL has no valid host: {}", url_str),
                )),
            }
        }
        Err(e) => Err(Diy99Error::validation(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Diy99Error::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(Diy99Error::validation(field_name, "List cannot be empty"));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(Diy99Error::validation(
            field_name,
            format!(
                "Unsupported value: {}. Allowed values: {}",
                value,
                allowed.join(", ")
            ),
        ));
    }
    Ok(())
}

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| {
        Regex::new("^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color pattern is valid")
    })
}

/// `#RGB` 或 `#RRGGBB`
pub fn validate_hex_color(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if !hex_color_regex().is_match(value) {
        return Err(Diy99Error::validation(
            field_name,
            format!("Invalid hex color: {}", value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(Diy99Error::validation(
            field_name,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
