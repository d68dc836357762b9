use clap::{Arg, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_EMAIL: &str = "email";
pub const ARG_ADMIN: &str = "admin";

fn username() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long("username")
        .help("Account username")
        .env("LIBRIS_USERNAME")
        .required(true)
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password, prompted for on stdin when omitted")
        .env("LIBRIS_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in and store the session token")
        .arg(username())
        .arg(password())
}

#[must_use]
pub fn register() -> Command {
    Command::new("register")
        .about("Create a new account")
        .arg(username())
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long("email")
                .help("Contact email address")
                .env("LIBRIS_EMAIL")
                .required(true),
        )
        .arg(password())
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long("confirm-password")
                .help("Password confirmation, prompted for on stdin when omitted")
                .env("LIBRIS_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ADMIN)
                .long("admin")
                .help("Request an administrator account (1) or a regular one (0)")
                .default_value("0")
                .value_parser(["0", "1"]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIAL_ENV: [(&str, Option<&str>); 4] = [
        ("LIBRIS_USERNAME", None),
        ("LIBRIS_PASSWORD", None),
        ("LIBRIS_CONFIRM_PASSWORD", None),
        ("LIBRIS_EMAIL", None),
    ];

    #[test]
    fn login_requires_username() {
        temp_env::with_vars(CREDENTIAL_ENV, || {
            assert!(login().try_get_matches_from(["login"]).is_err());

            let matches = login()
                .try_get_matches_from(["login", "-u", "ada"])
                .expect("matches");
            assert_eq!(
                matches.get_one::<String>(ARG_USERNAME).map(String::as_str),
                Some("ada")
            );
            assert!(matches.get_one::<String>(ARG_PASSWORD).is_none());
        });
    }

    #[test]
    fn login_password_from_env() {
        temp_env::with_vars(
            [
                ("LIBRIS_USERNAME", Some("ada")),
                ("LIBRIS_PASSWORD", Some("hunter22")),
            ],
            || {
                let matches = login().try_get_matches_from(["login"]).expect("matches");
                assert_eq!(
                    matches.get_one::<String>(ARG_PASSWORD).map(String::as_str),
                    Some("hunter22")
                );
            },
        );
    }

    #[test]
    fn register_defaults_to_regular_account() {
        temp_env::with_vars(CREDENTIAL_ENV, || {
            let matches = register()
                .try_get_matches_from(["register", "-u", "ada", "-e", "ada@example.org"])
                .expect("matches");
            assert_eq!(
                matches.get_one::<String>(ARG_ADMIN).map(String::as_str),
                Some("0")
            );
        });
    }

    #[test]
    fn register_rejects_unknown_admin_flag() {
        temp_env::with_vars(CREDENTIAL_ENV, || {
            let result = register().try_get_matches_from([
                "register",
                "-u",
                "ada",
                "-e",
                "ada@example.org",
                "--admin",
                "2",
            ]);
            assert!(result.is_err());
        });
    }
}
