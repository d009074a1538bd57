// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use chrono::Utc;
use contact_form_pipeline::Submission;
use std::net::{IpAddr, Ipv4Addr};

pub const LEGIT_MESSAGE: &str = "Hola, quiero un presupuesto para mi proyecto web";

/// Generate a pool of IP addresses for testing.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// Form timestamp for a page opened `ago_ms` milliseconds ago.
pub fn opened_ago(ago_ms: i64) -> i64 {
    Utc::now().timestamp_millis() - ago_ms
}

/// A submission a real visitor would send.
pub fn legit_submission() -> Submission {
    Submission {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        company: String::new(),
        budget: "5k-10k".to_string(),
        message: LEGIT_MESSAGE.to_string(),
        website: String::new(),
        consent: true,
        form_opened_at: Some(opened_ago(5_000)),
    }
}

/// Form-encoded body for a legitimate submission, with overrides.
pub fn legit_form(overrides: &[(&str, &str)]) -> String {
    let ts = opened_ago(5_000).to_string();
    let mut fields: Vec<(&str, &str)> = vec![
        ("name", "Ana"),
        ("email", "ana@example.com"),
        ("company", ""),
        ("budget", "5k-10k"),
        ("message", LEGIT_MESSAGE),
        ("website", ""),
        ("consent", "on"),
        ("_ts", ts.as_str()),
    ];
    for (key, value) in overrides {
        match fields.iter_mut().find(|(k, _)| k == key) {
            Some(field) => field.1 = *value,
            None => fields.push((*key, *value)),
        }
    }
    encode_form(&fields)
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// Values bots typically stuff into a hidden `website` field.
pub fn honeypot_values() -> Vec<&'static str> {
    vec![
        "http://spam.biz",
        "https://cheap-seo.example",
        "www.example.com",
        "x",
        "   a   ",
    ]
}

/// Messages that carry a denylisted keyword in varying case.
pub fn keyword_spam_messages() -> Vec<&'static str> {
    vec![
        "Buy cheap Viagra online today",
        "Best CASINO bonuses for your visitors",
        "Invest in Bitcoin and double it",
        "You are the lucky WINNER of our draw",
        "Click Here to claim your prize",
        "Claim your inheritance from a distant relative",
        "We offer a business LOAN at low rates",
    ]
}

/// Messages shaped like automated spam.
pub fn suspicious_messages() -> Vec<&'static str> {
    vec![
        "Visit https://a.example https://b.example https://c.example",
        "OFERTA ESPECIALISIMA solo hoy para ti",
        "Hola!!!!!! necesito ayuda con mi web",
        "hahahahaha que buena web tenéis",
        "abcabcabcabcabc presupuesto",
    ]
}

/// Messages a real visitor could send that must not trip the filters.
pub fn benign_messages() -> Vec<&'static str> {
    vec![
        LEGIT_MESSAGE,
        "Necesitamos una tienda online con pasarela de pago, ¿podéis ayudarnos?",
        "Os escribo desde Madrid. Mirad https://a.example y https://b.example",
        "Queremos migrar nuestra app de PHP a Rust, ¿cuánto costaría?",
        "Hola!! Me encanta vuestro trabajo. Hablamos?",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ips() {
        let ips = generate_ips(256);
        assert_eq!(ips.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = ips.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_legit_form_overrides() {
        let body = legit_form(&[("website", "http://spam.biz")]);
        assert!(body.contains("website=http%3A%2F%2Fspam.biz"));
        assert!(body.contains("consent=on"));
    }
}
