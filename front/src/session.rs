use uuid::Uuid;

/// The authentication collaborator as seen by the controllers: either a
/// signed-in user id or nothing. Obtaining and refreshing credentials is
/// someone else's problem.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<Uuid>,
}

impl Session {
    pub fn signed_in(user: Uuid) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn current_user(&self) -> Option<Uuid> {
        self.user
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
