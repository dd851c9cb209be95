//! rstest fixtures shared by the integration tests.

use reinhardt_factory::prelude::*;
use rstest::fixture;

use super::models::{Post, User};

/// Seeder with the `person_email` sequence and the `user` / `post` factories.
///
/// A post's author is created through the `user` factory.
#[fixture]
pub fn seeder() -> Seeder {
	let mut seeder = Seeder::new();

	seeder.define_sequence("person_email", |n| format!("person{}@example.com", n));
	seeder
		.define_with::<Post, _>("post", |s| {
			Ok(attributes! { "author" => Value::model(s.create::<User>("user")?) })
		})
		.expect("post is a valid factory name");
	seeder
		.define_with::<User, _>("user", |s| {
			Ok(attributes! {
				"name" => "Backbone User",
				"email" => s.next("person_email")?,
			})
		})
		.expect("user is a valid factory name");

	seeder
}
