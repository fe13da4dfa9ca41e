use estate_core::{AgentService, ErrorKind, PasswordHasher, ServiceError, SessionFactory};

fn hasher() -> PasswordHasher {
    PasswordHasher::with_cost(PasswordHasher::MIN_COST)
}

fn agent_count(sessions: &SessionFactory) -> i64 {
    sessions
        .connection()
        .query_row("SELECT COUNT(*) FROM agents;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn signup_creates_agent_with_hashed_password() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());

    let agent = agents.signup(" Ana ", "a@x.com", "hunter2").unwrap();
    assert!(agent.id > 0);
    assert_eq!(agent.name, "Ana");
    assert_eq!(agent.email, "a@x.com");
    assert_ne!(agent.hashed_password.as_str(), "hunter2");
    assert!(hasher().verify("hunter2", &agent.hashed_password));

    let stored: String = sessions
        .connection()
        .query_row(
            "SELECT hashed_password FROM agents WHERE id = ?1;",
            [agent.id],
            |row| row.get(0),
        )
        .unwrap();
    assert!(!stored.contains("hunter2"));
}

#[test]
fn duplicate_email_is_a_constraint_violation_and_keeps_first_agent() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());

    let first = agents.signup("Ana", "a@x.com", "first").unwrap();
    let err = agents.signup("Impostor", "A@X.com", "second").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    assert!(err.is_recoverable());
    assert_eq!(agent_count(&sessions), 1);

    let kept = agents.get_agent(first.id).unwrap().unwrap();
    assert_eq!(kept.name, "Ana");
    assert!(hasher().verify("first", &kept.hashed_password));
}

#[test]
fn signup_rejects_malformed_fields_without_writing() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());

    for (name, email, password) in [
        ("", "a@x.com", "pw"),
        ("Ana", "not-an-email", "pw"),
        ("Ana", "a@x.com", ""),
    ] {
        let err = agents.signup(name, email, password).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{name}/{email}");
    }
    assert_eq!(agent_count(&sessions), 0);
}

#[test]
fn login_accepts_correct_password_only() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());
    let created = agents.signup("Ana", "a@x.com", "hunter2").unwrap();

    let logged_in = agents.login("a@x.com", "hunter2").unwrap();
    assert_eq!(logged_in.id, created.id);

    assert!(matches!(
        agents.login("a@x.com", "wrong"),
        Err(ServiceError::InvalidCredentials)
    ));
    assert!(matches!(
        agents.login("nobody@x.com", "hunter2"),
        Err(ServiceError::InvalidCredentials)
    ));
}

#[test]
fn login_email_match_ignores_case() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());
    agents.signup("Ana", "Ana@X.com", "pw").unwrap();

    assert!(agents.login("ana@x.com", "pw").is_ok());
}

#[test]
fn list_agents_returns_storage_order() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());
    agents.signup("Ana", "a@x.com", "pw").unwrap();
    agents.signup("Bo", "b@x.com", "pw").unwrap();

    let names: Vec<_> = agents
        .list_agents()
        .unwrap()
        .into_iter()
        .map(|agent| agent.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
    assert!(agents.get_agent(999).unwrap().is_none());
}

#[test]
fn over_long_passwords_are_rejected_and_never_match_by_prefix() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());
    let stored = "p".repeat(PasswordHasher::MAX_PASSWORD_BYTES);
    agents.signup("Ana", "a@x.com", &stored).unwrap();

    let longer = format!("{stored}-suffix");
    assert!(matches!(
        agents.login("a@x.com", &longer),
        Err(ServiceError::InvalidCredentials)
    ));

    let err = agents.signup("Bo", "b@x.com", &longer).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(agent_count(&sessions), 1);
}

#[test]
fn unknown_email_is_rejected_like_a_wrong_password() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let agents = AgentService::new(&sessions, hasher());
    agents.signup("Ana", "a@x.com", "pw").unwrap();

    let unknown = agents.login("nobody@x.com", "pw").unwrap_err();
    let wrong = agents.login("a@x.com", "nope").unwrap_err();
    assert_eq!(unknown.kind(), wrong.kind());
    assert_eq!(unknown.to_string(), wrong.to_string());
}
