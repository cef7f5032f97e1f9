//! Line-oriented command grammar.

use supplink_application::NavigationCommand;
use supplink_core::{AppError, AppResult};
use supplink_domain::{RequestFilter, Role};

pub const HELP: &str = "\
sign-in <email> <password>
sign-up <email> <password> <role> <first-name> [last-name]
sign-out
go <target> [id]      targets: requests [filter], new-request, request <id>,
                      payment <id>, quote <id>, review <id>, suppliers,
                      supplier <id>, invite [request-id], epi, questionnaire,
                      progress, quotations, dashboard, profile, sign-up,
                      forgot-password, terms, clear
go {json}             a navigation command object, e.g. {\"command\":\"back\"}
back
state
view
help
quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        role: Role,
        first_name: String,
        last_name: String,
    },
    SignOut,
    Go(NavigationCommand),
    State,
    View,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        let Some((verb, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match verb {
            "sign-in" => {
                let [email, password] = words::<2>(rest, "sign-in <email> <password>")?;
                Self::SignIn { email, password }
            }
            "sign-up" => parse_sign_up(rest)?,
            "sign-out" => Self::SignOut,
            "go" => Self::Go(parse_go(rest)?),
            "back" => Self::Go(NavigationCommand::Back),
            "state" => Self::State,
            "view" => Self::View,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}', try 'help'"
                )));
            }
        };

        Ok(Some(command))
    }
}

fn parse_sign_up(rest: &str) -> AppResult<ShellCommand> {
    let usage = "sign-up <email> <password> <role> <first-name> [last-name]";
    let mut parts = rest.split_whitespace();
    let (Some(email), Some(password), Some(role), Some(first_name)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::Validation(format!("usage: {usage}")));
    };
    let last_name = parts.collect::<Vec<_>>().join(" ");

    Ok(ShellCommand::SignUp {
        email: email.to_owned(),
        password: password.to_owned(),
        role: role.parse()?,
        first_name: first_name.to_owned(),
        last_name,
    })
}

fn parse_go(rest: &str) -> AppResult<NavigationCommand> {
    if rest.starts_with('{') {
        return serde_json::from_str(rest).map_err(|error| {
            AppError::Validation(format!("invalid navigation command: {error}"))
        });
    }

    let Some((target, argument)) = split_word(rest) else {
        return Err(AppError::Validation("usage: go <target> [id]".to_owned()));
    };
    let argument = (!argument.is_empty()).then(|| argument.to_owned());
    let required = |name: &str| {
        argument
            .clone()
            .ok_or_else(|| AppError::Validation(format!("usage: go {target} <{name}>")))
    };

    let command = match target {
        "requests" => NavigationCommand::RequestsList {
            filter: argument
                .as_deref()
                .map(str::parse::<RequestFilter>)
                .transpose()?,
        },
        "new-request" => NavigationCommand::NewRequest,
        "request" => NavigationCommand::RequestDetail {
            request_id: required("request-id")?,
        },
        "payment" => NavigationCommand::PaymentTracking {
            request_id: required("request-id")?,
        },
        "quote" => NavigationCommand::QuotationForm {
            request_id: required("request-id")?,
        },
        "review" => NavigationCommand::RequestReview {
            request_id: required("request-id")?,
        },
        "suppliers" => NavigationCommand::SupplierList,
        "supplier" => NavigationCommand::SupplierDetail {
            supplier_id: required("supplier-id")?,
        },
        "invite" => NavigationCommand::SupplierInvite {
            request_id: argument,
        },
        "epi" => NavigationCommand::EpiConfiguration,
        "questionnaire" => NavigationCommand::SupplierQuestionnaire,
        "progress" => NavigationCommand::SupplierProgress,
        "quotations" => NavigationCommand::SupplierQuotations,
        "dashboard" => NavigationCommand::Dashboard,
        "profile" => NavigationCommand::Profile,
        "sign-up" => NavigationCommand::SignUp,
        "forgot-password" => NavigationCommand::ForgotPassword,
        "terms" => NavigationCommand::Terms,
        "back" => NavigationCommand::Back,
        "clear" => NavigationCommand::ClearContext,
        other => {
            return Err(AppError::Validation(format!(
                "unknown navigation target '{other}'"
            )));
        }
    };

    Ok(command)
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(
        input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(word, rest)| (word, rest.trim())),
    )
}

fn words<const N: usize>(input: &str, usage: &str) -> AppResult<[String; N]> {
    let parts: Vec<String> = input.split_whitespace().map(str::to_owned).collect();
    <[String; N]>::try_from(parts).map_err(|_| AppError::Validation(format!("usage: {usage}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            other => panic!("expected a command for '{line}', got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(ShellCommand::parse("   "), Ok(None));
    }

    #[test]
    fn sign_in_takes_exactly_two_words() {
        assert_eq!(
            parse("sign-in manager@supplink.example manager-pass"),
            ShellCommand::SignIn {
                email: "manager@supplink.example".to_owned(),
                password: "manager-pass".to_owned(),
            }
        );
        assert!(matches!(
            ShellCommand::parse("sign-in only-email"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn sign_up_joins_the_last_name() {
        assert_eq!(
            parse("sign-up a@b.example long-enough supplier Ana Maria Souza"),
            ShellCommand::SignUp {
                email: "a@b.example".to_owned(),
                password: "long-enough".to_owned(),
                role: Role::Supplier,
                first_name: "Ana".to_owned(),
                last_name: "Maria Souza".to_owned(),
            }
        );
        assert!(ShellCommand::parse("sign-up a@b.example pw wizard Ana").is_err());
    }

    #[test]
    fn go_shorthand_maps_to_navigation_commands() {
        assert_eq!(
            parse("go review req-1"),
            ShellCommand::Go(NavigationCommand::RequestReview {
                request_id: "req-1".to_owned()
            })
        );
        assert_eq!(
            parse("go requests pending"),
            ShellCommand::Go(NavigationCommand::RequestsList {
                filter: Some(RequestFilter::Pending)
            })
        );
        assert_eq!(
            parse("go invite"),
            ShellCommand::Go(NavigationCommand::SupplierInvite { request_id: None })
        );
        assert_eq!(parse("back"), ShellCommand::Go(NavigationCommand::Back));
    }

    #[test]
    fn go_accepts_json_commands() {
        assert_eq!(
            parse(r#"go {"command":"supplier_detail","supplier_id":"sup-1"}"#),
            ShellCommand::Go(NavigationCommand::SupplierDetail {
                supplier_id: "sup-1".to_owned()
            })
        );
    }

    #[test]
    fn go_reports_missing_ids_and_unknown_targets() {
        assert!(matches!(
            ShellCommand::parse("go supplier"),
            Err(AppError::Validation(message)) if message.contains("supplier-id")
        ));
        assert!(ShellCommand::parse("go nowhere").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }
}
