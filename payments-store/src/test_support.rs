//! Fixtures and behaviour checks shared by the adapter tests.
//!
//! Every adapter runs the same checks so they agree on not-found handling,
//! ordering and collection scoping.

use payments_model::{
    Charge, ChargesInformation, Collection, CreatePaymentRequest, ForeignExchange, Payment,
    PaymentId, PaymentStore, StoreError,
};

pub fn collection() -> Collection {
    Collection::new("PaymentDB", "Payment")
}

pub fn request(debtor_currency: &str) -> CreatePaymentRequest {
    serde_json::from_value(serde_json::json!({
        "organisation_id": "743d5b63-8e6f-432e-a8fa-c5d8d2ee5fcb",
        "amount": 100.21,
        "bearer_code": "SHAR",
        "beneficiary_party": {
            "account_name": "W Owens",
            "account_number": "31926819",
            "currency": "USD"
        },
        "debtor_party": {
            "account_name": "EJ Brown Black",
            "account_number": "GB29XABC10161234567801",
            "currency": debtor_currency
        },
        "payment_scheme": "FPS",
        "reference": "Payment for Em's piano lessons"
    }))
    .expect("fixture request is valid")
}

pub fn sample_payment(debtor_currency: &str) -> Payment {
    let charges = ChargesInformation {
        bearer_code: "SHAR".into(),
        sender_charges: vec![Charge::new(10.0, "USD")],
        receiver_charges_amount: 1.0,
        receiver_charges_currency: debtor_currency.into(),
    };
    Payment::assemble(
        PaymentId::new(),
        100.21,
        ForeignExchange::identity(),
        charges,
        &request(debtor_currency),
    )
}

pub async fn insert_then_find<S: PaymentStore>(store: &S) {
    let col = collection();
    let payment = sample_payment("GBP");

    store.insert(&col, &payment).await.unwrap();
    let found = store.find(&col, payment.id).await.unwrap();

    assert_eq!(found, payment);
}

pub async fn find_missing<S: PaymentStore>(store: &S) {
    let result = store.find(&collection(), PaymentId::new()).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

pub async fn find_all_in_insertion_order<S: PaymentStore>(store: &S) {
    let col = collection();
    assert!(store.find_all(&col).await.unwrap().is_empty());

    let first = sample_payment("GBP");
    let second = sample_payment("USD");
    let third = sample_payment("EUR");
    for payment in [&first, &second, &third] {
        store.insert(&col, payment).await.unwrap();
    }

    let ids: Vec<PaymentId> = store
        .find_all(&col)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

pub async fn update_replaces<S: PaymentStore>(store: &S) {
    let col = collection();
    let original = sample_payment("GBP");
    store.insert(&col, &original).await.unwrap();

    let mut replacement = sample_payment("EUR");
    replacement.id = original.id;
    replacement.attributes.amount = 42.5;
    store.update(&col, original.id, &replacement).await.unwrap();

    let found = store.find(&col, original.id).await.unwrap();
    assert_eq!(found, replacement);
    assert_eq!(store.find_all(&col).await.unwrap().len(), 1);
}

pub async fn update_missing<S: PaymentStore>(store: &S) {
    let payment = sample_payment("GBP");
    let result = store.update(&collection(), payment.id, &payment).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

pub async fn delete_then_find<S: PaymentStore>(store: &S) {
    let col = collection();
    let payment = sample_payment("GBP");
    store.insert(&col, &payment).await.unwrap();

    store.delete(&col, payment.id).await.unwrap();

    let result = store.find(&col, payment.id).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

pub async fn delete_missing<S: PaymentStore>(store: &S) {
    let result = store.delete(&collection(), PaymentId::new()).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}

pub async fn duplicate_id_conflicts<S: PaymentStore>(store: &S) {
    let col = collection();
    let payment = sample_payment("GBP");
    store.insert(&col, &payment).await.unwrap();

    let result = store.insert(&col, &payment).await;

    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

pub async fn collections_are_isolated<S: PaymentStore>(store: &S) {
    let payments = collection();
    let archive = Collection::new("PaymentDB", "archive");
    let other_db = Collection::new("other-db", "Payment");
    let payment = sample_payment("GBP");

    store.insert(&payments, &payment).await.unwrap();
    // Same id in another collection is a different document.
    store.insert(&archive, &payment).await.unwrap();

    assert!(matches!(
        store.find(&other_db, payment.id).await,
        Err(StoreError::NotFound)
    ));
    store.delete(&archive, payment.id).await.unwrap();
    assert_eq!(store.find(&payments, payment.id).await.unwrap(), payment);
}

pub async fn converted_amounts_round_trip_exactly<S: PaymentStore>(store: &S) {
    let col = collection();
    let quotients = [
        61187.870610439444,
        200.42 / 3.0,
        1.0 / 7.0,
        98765.4321 / 1.1234567,
        0.1 + 0.2,
    ];

    for amount in quotients {
        let mut payment = sample_payment("GBP");
        payment.attributes.amount = amount;
        store.insert(&col, &payment).await.unwrap();

        let found = store.find(&col, payment.id).await.unwrap();
        assert_eq!(
            found.attributes.amount.to_bits(),
            amount.to_bits(),
            "stored {} came back as {}",
            amount,
            found.attributes.amount
        );
    }
}
