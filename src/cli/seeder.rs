//! Database seeding for development and manual testing.
//!
//! Seeded users all share the password `password123` and carry
//! `@example.com` emails, which is also how `clear_seed` finds them again.

use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::PgPool;
use uuid::Uuid;
use vigia_core::Role;

use crate::utils::password::hash_password;

pub const SEED_PASSWORD: &str = "password123";

pub struct SeedConfig {
    pub students: usize,
    pub staff: usize,
    pub reports: usize,
    pub notices: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 25,
            staff: 5,
            reports: 10,
            notices: 3,
        }
    }
}

fn seed_user(role: Role, idx: usize) -> (String, String) {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email = format!(
        "{}.{}+{}{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role.as_str(),
        idx
    );
    (format!("{first_name} {last_name}"), email)
}

async fn insert_users(
    db: &PgPool,
    role: Role,
    count: usize,
    password_hash: &str,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut ids = Vec::with_capacity(count);
    for idx in 0..count {
        let (name, email) = seed_user(role, idx);
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&name)
        .bind(&email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(db)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash seed password: {}", e.error))?;

    let students = insert_users(db, Role::Student, config.students, &password_hash).await?;
    let staff = insert_users(db, Role::Staff, config.staff, &password_hash).await?;
    println!(
        "✅ Created {} students and {} staff (password: {SEED_PASSWORD})",
        students.len(),
        staff.len()
    );

    if config.reports > 0 && students.is_empty() {
        println!("⚠️  Skipped reports: no seeded students to attribute them to");
    } else {
        let report_types = ["bullying", "fight", "theft", "vandalism", "other"];
        for idx in 0..config.reports {
            let anonymous = idx % 3 == 0;
            let reporter = if anonymous {
                None
            } else {
                Some(students[idx % students.len()])
            };
            let location: String = StreetName().fake();
            sqlx::query(
                "INSERT INTO reports (type, description, location, anonymous, reporter_id)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(report_types[idx % report_types.len()])
            .bind(format!("Seeded incident #{idx}"))
            .bind(&location)
            .bind(anonymous)
            .bind(reporter)
            .execute(db)
            .await?;
        }
        println!("✅ Created {} reports", config.reports);
    }

    if config.notices > 0 && staff.is_empty() {
        println!("⚠️  Skipped notices: no seeded staff to author them");
    } else {
        for idx in 0..config.notices {
            sqlx::query("INSERT INTO notices (title, content, author_id) VALUES ($1, $2, $3)")
                .bind(format!("Seeded notice #{idx}"))
                .bind("Generated for development.")
                .bind(staff[idx % staff.len()])
                .execute(db)
                .await?;
        }
        println!("✅ Created {} notices", config.notices);
    }

    Ok(())
}

/// Removes seeded users and everything they authored. Admin accounts and
/// hand-entered data are left alone.
pub async fn clear_seed(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM reports WHERE description LIKE 'Seeded incident %'")
        .execute(db)
        .await?;
    sqlx::query("DELETE FROM notices WHERE title LIKE 'Seeded notice %'")
        .execute(db)
        .await?;
    let result = sqlx::query("DELETE FROM users WHERE email LIKE '%@example.com' AND role <> 'admin'")
        .execute(db)
        .await?;
    println!("✅ Cleared {} seeded users", result.rows_affected());
    Ok(())
}
