//! Interactive session console.
//!
//! Drives the same session manager the access-control core exposes, against
//! the live database: sign in as any user, inspect the materialized session
//! and probe role requirements without going through HTTP.

use dialoguer::{Input, Password, Select};
use sqlx::PgPool;
use uuid::Uuid;
use vigia_core::{AuthEvent, Principal, Role, RoleRequirement, SessionManager};

use crate::db::PgProfileStore;
use crate::utils::password::verify_password;

const COMMANDS: &[&str] = &["login", "logout", "whoami", "can", "exit"];

pub async fn run(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = SessionManager::new(PgProfileStore::new(pool.clone()));

    println!("Vigia session console. Sessions live only for this process.");

    loop {
        let choice = Select::new()
            .with_prompt("vigia")
            .items(COMMANDS)
            .default(0)
            .interact()?;

        match COMMANDS[choice] {
            "login" => login(&pool, &manager).await?,
            "logout" => {
                manager.apply(AuthEvent::SignedOut).await;
                println!("Signed out.");
            }
            "whoami" => match manager.current() {
                Some(session) => {
                    println!(
                        "{} <{}> role={} active={}",
                        session.name, session.email, session.role, session.is_active
                    );
                }
                None => println!("Not signed in."),
            },
            "can" => can(&manager),
            "exit" => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

async fn login(
    pool: &PgPool,
    manager: &SessionManager<PgProfileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let row = sqlx::query_as::<_, (Uuid, Option<String>)>(
        "SELECT id, password FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let Some((id, Some(hash))) = row else {
        println!("❌ Invalid email or password.");
        return Ok(());
    };

    let verified = verify_password(&password, &hash)
        .map_err(|e| format!("Password check failed: {}", e.error))?;
    if !verified {
        println!("❌ Invalid email or password.");
        return Ok(());
    }
    let session = manager
        .apply(AuthEvent::SignedIn(Principal { id, email }))
        .await;

    match session {
        Some(session) => println!("✅ Signed in as {} ({})", session.name, session.role),
        // Missing or deactivated profile record: the manager collapses both
        // to no session.
        None => println!("❌ Invalid email or password."),
    }

    Ok(())
}

fn can(manager: &SessionManager<PgProfileStore>) {
    let requirements: &[(&str, RoleRequirement)] = &[
        ("at least student", RoleRequirement::AtLeast(Role::Student)),
        ("at least staff", RoleRequirement::AtLeast(Role::Staff)),
        ("at least admin", RoleRequirement::AtLeast(Role::Admin)),
        (
            "staff or admin",
            RoleRequirement::AnyOf(&[Role::Staff, Role::Admin]),
        ),
    ];

    for (label, requirement) in requirements {
        let allowed = manager.has_permission(requirement);
        println!("{} {}", if allowed { "✅" } else { "❌" }, label);
    }
}
