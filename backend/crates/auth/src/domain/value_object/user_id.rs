use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

impl UserMarker {}
