use crate::benefit::BenefitRecord;
use crate::date::format_day_month_year;
use crate::template::ReminderKind;
use chrono::NaiveDate;

/// Replaces every `{name}` occurrence for the given variables. Placeholders
/// with no matching variable are left verbatim so a typo in a tenant template
/// degrades to visible text instead of an error.
pub fn render_template(body: &str, vars: &[(&str, String)]) -> String {
    let mut rendered = body.to_string();
    for (name, value) in vars {
        let placeholder = format!("{{{}}}", name);
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

/// The variables a reminder message may reference.
pub fn reminder_vars(
    record: &BenefitRecord,
    tenant_name: &str,
    kind: ReminderKind,
    expires: NaiveDate,
) -> Vec<(&'static str, String)> {
    vec![
        ("cliente_nome", record.client_name.clone()),
        (
            "cliente_cpf",
            record.client_tax_id.clone().unwrap_or_default(),
        ),
        ("valor", format!("{:.2}", record.amount)),
        ("dias_restantes", kind.days().to_string()),
        ("data_vencimento", format_day_month_year(expires)),
        ("empresa_nome", tenant_name.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_substitutes_known_placeholders() {
        let rendered = render_template(
            "Olá {cliente_nome}, vence em {dias_restantes} dias",
            &[
                ("cliente_nome", "Ana".to_string()),
                ("dias_restantes", "3".to_string()),
            ],
        );
        assert_eq!(rendered, "Olá Ana, vence em 3 dias");
    }

    #[test]
    fn it_leaves_unknown_placeholders_verbatim() {
        let rendered = render_template(
            "Oi {cliente_nome}, veja {foo}",
            &[("cliente_nome", "Ana".to_string())],
        );
        assert_eq!(rendered, "Oi Ana, veja {foo}");
    }

    #[test]
    fn it_replaces_every_occurrence() {
        let rendered = render_template(
            "{valor} + {valor}",
            &[("valor", "10.00".to_string())],
        );
        assert_eq!(rendered, "10.00 + 10.00");
    }

    #[test]
    fn it_is_idempotent_for_the_same_input() {
        let vars = vec![("cliente_nome", "Ana".to_string())];
        let first = render_template("Olá {cliente_nome}", &vars);
        let second = render_template("Olá {cliente_nome}", &vars);
        assert_eq!(first, second);
    }
}
