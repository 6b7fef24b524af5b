//! Contact page.

use anyhow::{bail, Result};
use dialoguer::Input;
use shop_commerce::prelude::*;

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let interactive = !args.no_input && !ctx.output.is_json();

    let mut form = ContactForm::default();
    let provided = [
        (ContactField::FullName, args.name),
        (ContactField::Subject, args.subject),
        (ContactField::Email, args.email),
        (ContactField::Message, args.message),
    ];

    for (field, value) in provided {
        match value {
            Some(value) => form.set(field, value),
            None if interactive => form.set(field, prompt(field)?),
            None => {}
        }
    }

    match form.submit(&ctx.notifications) {
        Ok(_) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "sent": true }));
            } else {
                ctx.flush_notification();
            }
            Ok(())
        }
        Err(validation) => {
            let errors: Vec<(ContactField, &str)> = ContactField::ALL
                .iter()
                .filter_map(|f| validation.error_for(*f).map(|e| (*f, e)))
                .collect();

            if ctx.output.is_json() {
                let map: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|(f, e)| (f.label().to_string(), serde_json::Value::from(*e)))
                    .collect();
                ctx.output.json(&serde_json::json!({ "sent": false, "errors": map }));
            } else {
                for (field, error) in &errors {
                    ctx.output.warn(&format!("{}: {}", field, error));
                }
            }
            bail!("Please fix the highlighted fields.")
        }
    }
}

fn prompt(field: ContactField) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(field.label())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
