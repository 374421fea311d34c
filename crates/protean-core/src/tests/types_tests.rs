//! Tests for [`TypeDef`], [`Identity`], and [`Object`].

use rstest::{fixture, rstest};

use crate::{Identity, Object, PLAIN_OBJECT_TYPE, TypeDef, Value};

struct Hierarchy {
    user: TypeDef,
    guest: TypeDef,
    admin: TypeDef,
    superuser: TypeDef,
}

#[fixture]
fn hierarchy() -> Hierarchy {
    let user = TypeDef::with_identity("User", "user");
    let guest = TypeDef::builder("Guest").parent(&user).build();
    let admin = TypeDef::builder("Admin")
        .parent(&user)
        .identity("admin")
        .build();
    let superuser = TypeDef::builder("Superuser").parent(&admin).build();
    Hierarchy {
        user,
        guest,
        admin,
        superuser,
    }
}

fn tags(chain: &[Identity]) -> Vec<&str> {
    chain.iter().map(Identity::as_str).collect()
}

#[rstest]
fn own_identity_ignores_ancestors(hierarchy: Hierarchy) {
    assert_eq!(hierarchy.guest.own_identity(), None);
    assert_eq!(
        hierarchy.admin.own_identity().map(Identity::as_str),
        Some("admin")
    );
}

#[rstest]
fn resolved_identity_is_nearest_declaration(hierarchy: Hierarchy) {
    let resolved = |ty: &TypeDef| ty.resolved_identity().map(|id| id.as_str().to_owned());
    assert_eq!(resolved(&hierarchy.user).as_deref(), Some("user"));
    assert_eq!(resolved(&hierarchy.guest).as_deref(), Some("user"));
    assert_eq!(resolved(&hierarchy.admin).as_deref(), Some("admin"));
    assert_eq!(resolved(&hierarchy.superuser).as_deref(), Some("admin"));
}

#[rstest]
fn identity_chain_lists_declarations_nearest_first(hierarchy: Hierarchy) {
    assert_eq!(tags(&hierarchy.superuser.identity_chain()), ["admin", "user"]);
    assert_eq!(tags(&hierarchy.guest.identity_chain()), ["user"]);
}

#[test]
fn identity_chain_skips_redeclared_identity() {
    let base = TypeDef::with_identity("Base", "shape");
    let derived = TypeDef::builder("Derived")
        .parent(&base)
        .identity("shape")
        .build();
    assert_eq!(tags(&derived.identity_chain()), ["shape"]);
}

#[rstest]
fn ancestors_walk_parent_links(hierarchy: Hierarchy) {
    let names: Vec<&str> = hierarchy.superuser.ancestors().map(TypeDef::name).collect();
    assert_eq!(names, ["Superuser", "Admin", "User"]);
    assert!(hierarchy.superuser.is_subtype_of(&hierarchy.user));
    assert!(!hierarchy.user.is_subtype_of(&hierarchy.guest));
    assert!(
        hierarchy
            .guest
            .parent()
            .is_some_and(|parent| *parent == hierarchy.user)
    );
}

#[test]
fn type_equality_is_definition_identity() {
    let first = TypeDef::with_identity("Dog", "dog");
    let second = TypeDef::with_identity("Dog", "dog");
    assert_eq!(first, first.clone());
    assert_ne!(first, second);
}

#[test]
fn plain_object_type_has_no_identity() {
    let object = Object::plain();
    assert_eq!(object.type_def().name(), PLAIN_OBJECT_TYPE);
    assert!(object.type_def().resolved_identity().is_none());
    assert!(object.fields().is_empty());
}

#[test]
fn object_fields_are_set_and_read() {
    let point = TypeDef::with_identity("Point", "point");
    let p = point.instance().with_field("x", 1).with_field("y", 2);
    assert_eq!(p.field("x"), Some(&Value::from(1)));
    assert_eq!(p.field("z"), None);
    assert_eq!(p.type_def(), &point);
}

#[test]
fn identity_displays_its_tag() {
    let identity = Identity::from("human");
    assert_eq!(identity.to_string(), "human");
}

#[test]
fn private_identities_differ_from_shared_ones_with_the_same_tag() {
    let private = Identity::private("human");
    assert!(private.is_private());
    assert_ne!(private, Identity::new("human"));
    assert_ne!(private, Identity::private("human"));
    assert_eq!(private, private.clone());
    assert_eq!(private.as_str(), "human");
    assert!(private.to_string().starts_with("human#"));
}

#[test]
fn private_identity_types_are_inherited_by_descendants() {
    let base = TypeDef::with_private_identity("Base");
    let child = TypeDef::builder("Child").parent(&base).build();
    assert_eq!(child.resolved_identity().as_ref(), base.own_identity());
    assert_ne!(base.own_identity(), Some(&Identity::new("Base")));
}
