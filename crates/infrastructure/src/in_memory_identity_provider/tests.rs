use supplink_application::IdentityProvider;
use supplink_core::AppError;

use super::InMemoryIdentityProvider;

#[tokio::test]
async fn seeded_account_signs_in_and_is_published() {
    let provider = InMemoryIdentityProvider::new();
    let seeded = provider
        .seed_account("u-manager", "Manager@Plant.Example", "correct-horse")
        .await;
    assert!(seeded.is_ok());

    let receiver = provider.subscribe();
    let principal = provider
        .sign_in("  manager@plant.example ", "correct-horse")
        .await;

    assert!(principal.is_ok());
    let principal = principal.unwrap_or_else(|_| unreachable!());
    assert_eq!(principal.uid(), "u-manager");
    assert_eq!(principal.email(), "manager@plant.example");
    assert_eq!(receiver.borrow().as_ref(), Some(&principal));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_share_one_message() {
    let provider = InMemoryIdentityProvider::new();
    let _ = provider
        .seed_account("u-1", "one@plant.example", "correct-horse")
        .await;

    let wrong_password = provider.sign_in("one@plant.example", "nope").await;
    let unknown = provider.sign_in("two@plant.example", "correct-horse").await;

    assert_eq!(
        wrong_password,
        Err(AppError::Unauthorized("invalid email or password".to_owned()))
    );
    assert_eq!(wrong_password, unknown);
    assert!(provider.subscribe().borrow().is_none());
}

#[tokio::test]
async fn sign_up_rejects_a_taken_email() {
    let provider = InMemoryIdentityProvider::new();
    let first = provider.sign_up("new@plant.example", "long-enough").await;
    assert!(first.is_ok());

    let second = provider.sign_up("NEW@plant.example", "long-enough").await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(provider.account_count().await, 1);
}

#[tokio::test]
async fn sign_out_publishes_no_principal() {
    let provider = InMemoryIdentityProvider::new();
    let _ = provider.sign_up("new@plant.example", "long-enough").await;
    let mut receiver = provider.subscribe();
    receiver.mark_unchanged();

    assert!(provider.sign_out().await.is_ok());
    assert!(receiver.has_changed().unwrap_or(false));
    assert!(receiver.borrow_and_update().is_none());
}
