use nebula_errorx::{CaptureConfig, ErrorX, Result, ResultExt, ValidationErrors, ensure, status_errorx};
use tracing::Level;

struct SignupForm<'a> {
    name: &'a str,
    email: &'a str,
}

fn validate(form: &SignupForm<'_>) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if form.name.is_empty() {
        errors = errors.with("Name", "required");
    }
    if !form.email.contains('@') {
        errors = errors.with("Email", "email");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn signup(form: &SignupForm<'_>) -> Result<u64> {
    ensure!(form.name.len() < 64, status_errorx!(413, "name too long"));
    validate(form).with_status(422, "invalid signup form")?;
    Ok(42)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    CaptureConfig::from_env()?.install()?;

    let form = SignupForm {
        name: "",
        email: "nobody",
    };

    match signup(&form) {
        Ok(id) => println!("created user {id}"),
        Err(err) => {
            err.log(Level::WARN);

            println!("Rendered:\n   {err}");
            println!("\nResponse body:");
            let body = err.response(&["message", "status", "validation_errors"]);
            println!("{}", serde_json::to_string_pretty(&body)?);
            println!("\nRaised at {}", err.caller());
            print!("{}", err.stack());
        }
    }

    let err = ErrorX::new("plain failure");
    println!("\nPlain: {err}");

    Ok(())
}
