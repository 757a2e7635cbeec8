use super::invitations::{accept, decline, ensure_kind, find_invitation_mut, mark_received};
use super::test_fixtures::invitation;
use crate::entities::{InvitationKind, InvitationStatus, Player};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

#[test]
fn accept_sets_flag_and_status() {
    let mut inv = invitation("i1", InvitationKind::Group);
    accept(&mut inv).unwrap();
    assert!(inv.accepted);
    assert!(!inv.declined);
    assert_eq!(inv.status, InvitationStatus::Accepted);
}

#[test]
fn accepting_a_declined_invitation_fails_and_changes_nothing() {
    let mut inv = invitation("i1", InvitationKind::Game);
    decline(&mut inv).unwrap();
    let before = inv.clone();

    let err = accept(&mut inv).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InvitationAlreadyDeclined, _)
    ));
    assert!(err.is_already_terminal());
    assert_eq!(inv, before);
}

#[test]
fn declining_an_accepted_invitation_fails() {
    let mut inv = invitation("i1", InvitationKind::Group);
    accept(&mut inv).unwrap();
    let err = decline(&mut inv).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InvitationAlreadyAccepted, _)
    ));
    assert!(inv.accepted && !inv.declined);
}

#[test]
fn flags_are_never_both_set() {
    for first_accepts in [true, false] {
        let mut inv = invitation("i1", InvitationKind::Group);
        let _ = if first_accepts { accept(&mut inv) } else { decline(&mut inv) };
        let _ = accept(&mut inv);
        let _ = decline(&mut inv);
        assert!(!(inv.accepted && inv.declined));
    }
}

#[test]
fn mark_received_only_moves_created() {
    let mut inv = invitation("i1", InvitationKind::Group);
    inv.status = InvitationStatus::Created;
    mark_received(&mut inv);
    assert_eq!(inv.status, InvitationStatus::Received);

    accept(&mut inv).unwrap();
    mark_received(&mut inv);
    assert_eq!(inv.status, InvitationStatus::Accepted);
}

#[test]
fn kind_mismatch_is_a_validation_error() {
    let inv = invitation("i1", InvitationKind::Game);
    let err = ensure_kind(&inv, InvitationKind::Group).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvitationKindMismatch, _)
    ));
    assert!(ensure_kind(&inv, InvitationKind::Game).is_ok());
}

#[test]
fn missing_invitation_is_not_found() {
    let mut player = Player::new("p1", "ana");
    let err = find_invitation_mut(&mut player, "nope").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Invitation, _)));

    player
        .invitations
        .insert("i1".into(), invitation("i1", InvitationKind::Group));
    assert_eq!(find_invitation_mut(&mut player, "i1").unwrap().bin, "i1");
}
