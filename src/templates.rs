// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Email templates for new leads.
//!
//! Every user-supplied value is HTML-escaped before it lands in an HTML
//! body. Plain-text bodies carry the values verbatim.

use crate::config::BrandingConfig;
use crate::submission::Submission;
use chrono::{DateTime, Utc};

const UNSPECIFIED: &str = "No especificada";

/// A rendered email, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Notification sent to the operator for every accepted submission.
pub fn lead_notification(
    submission: &Submission,
    client_ip: &str,
    received_at: DateTime<Utc>,
    branding: &BrandingConfig,
) -> RenderedEmail {
    let company = submission.company().unwrap_or(UNSPECIFIED);
    let timestamp = received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let html = format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #4f46e5;">Nuevo contacto desde {site}</h2>
  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Nombre:</strong> {name}</p>
    <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
    <p><strong>Empresa:</strong> {company}</p>
    <p><strong>Presupuesto:</strong> {budget}</p>
  </div>
  <div style="margin: 20px 0;">
    <h3 style="color: #374151;">Mensaje:</h3>
    <div style="background: white; padding: 15px; border-left: 4px solid #4f46e5; white-space: pre-wrap;">{message}</div>
  </div>
  <hr style="margin: 30px 0; border: none; border-top: 1px solid #e5e7eb;">
  <div style="font-size: 12px; color: #6b7280;">
    <p><strong>Información técnica:</strong></p>
    <p>IP: {ip}</p>
    <p>Timestamp: {timestamp}</p>
  </div>
</div>"#,
        site = escape_html(&branding.site_name),
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        company = escape_html(company),
        budget = escape_html(&submission.budget),
        message = escape_html(&submission.message),
        ip = escape_html(client_ip),
        timestamp = timestamp,
    );

    let text = format!(
        "Nuevo contacto desde {site}\n\n\
         Nombre: {name}\n\
         Email: {email}\n\
         Empresa: {company}\n\
         Presupuesto: {budget}\n\n\
         Mensaje:\n{message}\n\n\
         ---\n\
         IP: {ip}\n\
         Timestamp: {timestamp}",
        site = branding.site_name,
        name = submission.name,
        email = submission.email,
        company = company,
        budget = submission.budget,
        message = submission.message,
        ip = client_ip,
        timestamp = received_at.to_rfc3339(),
    );

    RenderedEmail {
        subject: format!("Nuevo lead desde la web — {}", submission.name),
        html,
        text,
    }
}

/// Acknowledgment sent to the submitter.
pub fn client_confirmation(submission: &Submission, branding: &BrandingConfig) -> RenderedEmail {
    let company = submission.company().unwrap_or(UNSPECIFIED);
    let site = escape_html(&branding.site_name);
    let tagline = escape_html(&branding.tagline);
    let site_url = escape_html(&branding.site_url);
    let site_host = branding
        .site_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    let html = format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; background: #f8fafc; padding: 40px 20px;">
  <div style="background: white; padding: 40px; border-radius: 12px;">
    <div style="text-align: center; margin-bottom: 30px;">
      <h1 style="color: #4f46e5; font-size: 28px; margin: 0;">{site}</h1>
      <p style="color: #6b7280; margin: 5px 0 0 0;">{tagline}</p>
    </div>
    <h2 style="color: #374151; font-size: 24px; margin-bottom: 20px;">¡Hola {name}!</h2>
    <p style="color: #4b5563; line-height: 1.6;">Gracias por contactarnos. Hemos recibido tu mensaje y queremos confirmarte que nuestro equipo lo revisará muy pronto.</p>
    <div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 25px 0;">
      <h3 style="color: #374151; margin: 0 0 15px 0; font-size: 18px;">Resumen de tu consulta:</h3>
      <p style="margin: 8px 0; color: #4b5563;"><strong>Empresa:</strong> {company}</p>
      <p style="margin: 8px 0; color: #4b5563;"><strong>Presupuesto:</strong> {budget}</p>
      <p style="margin: 15px 0 8px 0; color: #374151; font-weight: 600;">Tu mensaje:</p>
      <div style="background: white; padding: 15px; border-radius: 6px; border-left: 4px solid #4f46e5; white-space: pre-wrap; color: #4b5563;">{message}</div>
    </div>
    <p style="color: #4b5563; line-height: 1.6;"><strong>¿Qué sigue?</strong><br>Nuestro equipo analizará tu proyecto y te responderemos en un plazo máximo de 24 horas con una propuesta inicial y los siguientes pasos.</p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{site_url}" style="display: inline-block; background: #4f46e5; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; font-weight: 600;">Visitar nuestro sitio web</a>
    </div>
    <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 30px 0;">
    <div style="text-align: center;">
      <p style="color: #6b7280; font-size: 14px; margin: 0;">Este es un email automático, por favor no respondas a este mensaje.</p>
      <p style="color: #6b7280; font-size: 14px; margin: 10px 0 0 0;"><strong>{site}</strong> — {tagline}<br><a href="{site_url}" style="color: #4f46e5;">{site_host}</a></p>
    </div>
  </div>
</div>"#,
        site = site,
        tagline = tagline,
        name = escape_html(&submission.name),
        company = escape_html(company),
        budget = escape_html(&submission.budget),
        message = escape_html(&submission.message),
        site_url = site_url,
        site_host = escape_html(site_host),
    );

    let text = format!(
        "¡Hola {name}!\n\n\
         Gracias por contactarnos. Hemos recibido tu mensaje y queremos confirmarte que nuestro equipo lo revisará muy pronto.\n\n\
         RESUMEN DE TU CONSULTA:\n\
         Empresa: {company}\n\
         Presupuesto: {budget}\n\n\
         Tu mensaje:\n{message}\n\n\
         ¿QUÉ SIGUE?\n\
         Nuestro equipo analizará tu proyecto y te responderemos en un plazo máximo de 24 horas con una propuesta inicial y los siguientes pasos.\n\n\
         ---\n\
         Este es un email automático, por favor no respondas a este mensaje.\n\n\
         {site} — {tagline}\n\
         {site_url}",
        name = submission.name,
        company = company,
        budget = submission.budget,
        message = submission.message,
        site = branding.site_name,
        tagline = branding.tagline,
        site_url = branding.site_url,
    );

    RenderedEmail {
        subject: format!("¡Gracias por contactarnos! — {}", branding.site_name),
        html,
        text,
    }
}
