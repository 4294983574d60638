mod route_guards;

pub use route_guards::{
    protect_admin_route, protect_foundation_route, protect_optional_route, protect_route,
    FoundationMember,
};
