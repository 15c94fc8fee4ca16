use std::{env, fs, path::Path};

use anyhow::Context;
use tugas::{
    api::ApiClient,
    config::Config,
    session::Session,
    submission::{Assignment, StepMark, SubmissionDraft, Wizard, WizardStep},
    telemetry,
};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const USAGE: &str = "Usage:
  tugas review <assignment.(json|yaml) | assignment_id> <draft.yaml>
  tugas submit <assignment_id> <draft.yaml>
  tugas login <username> <password>
  tugas logout";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Review { assignment: String, draft: String },
    Submit { assignment_id: String, draft: String },
    Login { username: String, password: String },
    Logout,
}

fn parse_command(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    let command = args.next().context("a command is required")?;

    let command = match command.as_str() {
        "review" => Command::Review {
            assignment: args.next().context("assignment file or id is required")?,
            draft: args.next().context("draft file is required")?,
        },
        "submit" => Command::Submit {
            assignment_id: args.next().context("assignment id is required")?,
            draft: args.next().context("draft file is required")?,
        },
        "login" => Command::Login {
            username: args.next().context("username is required")?,
            password: args.next().context("password is required")?,
        },
        "logout" => Command::Logout,
        other => anyhow::bail!("unknown command '{}'", other),
    };

    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument '{}'", extra);
    }
    Ok(command)
}

fn main() -> anyhow::Result<()> {
    let command = match parse_command(env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", USAGE);
            return Err(e);
        }
    };

    let config = Config::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config).context("failed to initialise logging")?;

    let mut session = Session::init(&config.token_path)?;
    let client = ApiClient::new(config.api_url.as_str());

    match command {
        Command::Review { assignment, draft } => {
            let assignment = load_assignment(&client, &mut session, &assignment)?;
            let draft = SubmissionDraft::load(Path::new(&draft))?;
            print_review(&Wizard::with_draft(assignment, draft));
        }
        Command::Submit {
            assignment_id,
            draft,
        } => {
            let assignment = client
                .fetch_assignment(&mut session, &assignment_id)
                .context(format!("could not fetch assignment {}", assignment_id))?;
            let draft = SubmissionDraft::load(Path::new(&draft))?;
            let wizard = Wizard::with_draft(assignment, draft);
            print_review(&wizard);

            for warning in wizard.review().warnings() {
                tracing::warn!(%warning, "submitting anyway");
            }

            let receipt = client
                .submit(&mut session, &assignment_id, wizard.draft())
                .context("submission was not accepted")?;
            println!(
                "submitted {BOLD}{}{RESET}{}",
                wizard.assignment().title,
                receipt
                    .id_label()
                    .map(|id| format!(" as #{}", id))
                    .unwrap_or_default()
            );
        }
        Command::Login { username, password } => {
            client
                .login(&mut session, &username, &password)
                .context("login failed")?;
            println!("logged in as {BOLD}{}{RESET}", username);
        }
        Command::Logout => {
            session.clear()?;
            println!("logged out");
        }
    }

    Ok(())
}

/// Reads the assignment from a local file when `source` is a path, otherwise
/// fetches it by id.
fn load_assignment(
    client: &ApiClient,
    session: &mut Session,
    source: &str,
) -> anyhow::Result<Assignment> {
    let path = Path::new(source);
    if path.is_file() {
        let content =
            fs::read_to_string(path).context(format!("failed to read {}", path.display()))?;
        return serde_yaml_ng::from_str(&content)
            .context(format!("{} is not a valid assignment", path.display()));
    }

    client
        .fetch_assignment(session, source)
        .context(format!("could not fetch assignment {}", source))
}

fn print_review(wizard: &Wizard) {
    let mut wizard = wizard.clone();
    wizard.set_step(WizardStep::Review);

    let steps = wizard
        .steps()
        .indicators()
        .iter()
        .map(|(step, mark)| {
            let symbol = match mark {
                StepMark::Complete => "✓",
                StepMark::Active => "●",
                StepMark::Pending => "○",
            };
            format!("{} {}", symbol, step.title())
        })
        .collect::<Vec<String>>()
        .join("  ");

    println!("{}\n", steps);
    println!("{}", wizard.review());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<String>>()
            .into_iter()
    }

    #[test]
    fn parses_review() {
        assert_eq!(
            parse_command(args(&["review", "tugas.json", "draft.yaml"])).unwrap(),
            Command::Review {
                assignment: "tugas.json".to_string(),
                draft: "draft.yaml".to_string(),
            }
        );
    }

    #[test]
    fn parses_logout() {
        assert_eq!(parse_command(args(&["logout"])).unwrap(), Command::Logout);
    }

    #[test]
    fn rejects_missing_and_extra_arguments() {
        assert!(parse_command(args(&[])).is_err());
        assert!(parse_command(args(&["submit", "12"])).is_err());
        assert!(parse_command(args(&["logout", "now"])).is_err());
        assert!(parse_command(args(&["grade", "12"])).is_err());
    }
}
