//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use async_trait::async_trait;

    use payments_model::{
        AppError, Charge, ChargesInformation, ChargesProvider, Collection, CreatePaymentRequest,
        ExchangeRateProvider, ForeignExchange, Payment, PaymentId, PaymentStore, QuoteError,
        StoreError,
    };

    use crate::PaymentService;
    use crate::service::{
        CREATE_FAILED, CREATE_PARSE_FAILED, DELETE_FAILED, QUERY_FAILED, UPDATE_FAILED,
        UPDATE_PARSE_FAILED,
    };

    /// Simple in-memory store for testing the service layer.
    #[derive(Default)]
    pub struct MockStore {
        docs: Mutex<Vec<(Collection, Payment)>>,
        offline: AtomicBool,
        fail_deletes: AtomicBool,
    }

    impl MockStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(StoreError::Database("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PaymentStore for MockStore {
        async fn insert(
            &self,
            collection: &Collection,
            payment: &Payment,
        ) -> Result<(), StoreError> {
            self.check()?;
            self.docs
                .lock()
                .unwrap()
                .push((collection.clone(), payment.clone()));
            Ok(())
        }

        async fn find(
            &self,
            collection: &Collection,
            id: PaymentId,
        ) -> Result<Payment, StoreError> {
            self.check()?;
            self.docs
                .lock()
                .unwrap()
                .iter()
                .find(|(c, p)| c == collection && p.id == id)
                .map(|(_, p)| p.clone())
                .ok_or(StoreError::NotFound)
        }

        async fn find_all(&self, collection: &Collection) -> Result<Vec<Payment>, StoreError> {
            self.check()?;
            Ok(self
                .docs
                .lock()
                .unwrap()
                .iter()
                .filter(|(c, _)| c == collection)
                .map(|(_, p)| p.clone())
                .collect())
        }

        async fn update(
            &self,
            collection: &Collection,
            id: PaymentId,
            payment: &Payment,
        ) -> Result<(), StoreError> {
            self.check()?;
            let mut docs = self.docs.lock().unwrap();
            let slot = docs
                .iter_mut()
                .find(|(c, p)| c == collection && p.id == id)
                .ok_or(StoreError::NotFound)?;
            slot.1 = payment.clone();
            Ok(())
        }

        async fn delete(&self, collection: &Collection, id: PaymentId) -> Result<(), StoreError> {
            self.check()?;
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(StoreError::Database("write concern failed".into()));
            }
            let mut docs = self.docs.lock().unwrap();
            let before = docs.len();
            docs.retain(|(c, p)| !(c == collection && p.id == id));
            if docs.len() == before {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }
    }

    /// Rate provider returning a configurable rate and counting calls.
    pub struct MockRates {
        rate: f64,
        calls: AtomicU32,
        fail: Option<fn() -> QuoteError>,
    }

    impl MockRates {
        fn new(rate: f64) -> Self {
            Self {
                rate,
                calls: AtomicU32::new(0),
                fail: None,
            }
        }

        fn failing(fail: fn() -> QuoteError) -> Self {
            Self {
                fail: Some(fail),
                ..Self::new(2.0)
            }
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for MockRates {
        async fn get_rate(
            &self,
            target_currency: &str,
            _source_currency: &str,
            amount: f64,
        ) -> Result<ForeignExchange, QuoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            Ok(ForeignExchange {
                contract_reference: "TEST".into(),
                exchange_rate: self.rate,
                original_amount: amount,
                original_currency: target_currency.into(),
            })
        }
    }

    /// Charges provider echoing its inputs into the breakdown.
    pub struct EchoCharges;

    #[async_trait]
    impl ChargesProvider for EchoCharges {
        async fn get_charges(
            &self,
            exchange_rate: f64,
            bearer_code: &str,
            sender_currency: &str,
            receiver_currency: &str,
        ) -> Result<ChargesInformation, QuoteError> {
            Ok(ChargesInformation {
                bearer_code: bearer_code.into(),
                sender_charges: vec![
                    Charge::new(exchange_rate, sender_currency),
                    Charge::new(1.0, receiver_currency),
                ],
                receiver_charges_amount: 0.5,
                receiver_charges_currency: receiver_currency.into(),
            })
        }
    }

    type Fixture = (PaymentService<Arc<MockStore>>, Arc<MockStore>, Arc<MockRates>);

    fn service_with(rates: MockRates) -> Fixture {
        let store = Arc::new(MockStore::default());
        let rates = Arc::new(rates);
        let service = PaymentService::new(store.clone(), rates.clone(), Arc::new(EchoCharges));
        (service, store, rates)
    }

    fn service() -> Fixture {
        service_with(MockRates::new(2.0))
    }

    fn request(beneficiary_currency: &str, debtor_currency: &str) -> CreatePaymentRequest {
        serde_json::from_value(serde_json::json!({
            "organisation_id": "o1",
            "amount": 200.42,
            "bearer_code": "SHAR",
            "beneficiary_party": { "account_number": "31926819", "currency": beneficiary_currency },
            "debtor_party": { "account_number": "GB29XABC10161234567801", "currency": debtor_currency },
            "reference": "Payment for Em's piano lessons"
        }))
        .unwrap()
    }

    async fn stored(service: &PaymentService<Arc<MockStore>>, id: PaymentId) -> Payment {
        service
            .get_payment(&id.to_hex())
            .await
            .unwrap()
            .data
            .remove(0)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Create
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_converts_across_currencies() {
        let (service, _, rates) = service();

        let created = service.create_payment(request("USD", "GBP")).await.unwrap();
        let payment = stored(&service, created.id).await;

        assert_eq!(created.organisation_id, "o1");
        assert_eq!(payment.attributes.amount, 100.21);
        assert_eq!(payment.attributes.fx.exchange_rate, 2.0);
        assert_eq!(payment.attributes.fx.original_amount, 200.42);
        assert_eq!(payment.attributes.currency, "USD");
        assert_eq!(rates.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_same_currency_skips_rate_lookup() {
        let (service, _, rates) = service();

        let created = service.create_payment(request("GBP", "GBP")).await.unwrap();
        let payment = stored(&service, created.id).await;

        assert_eq!(payment.attributes.amount, 200.42);
        assert_eq!(payment.attributes.fx, ForeignExchange::identity());
        assert_eq!(rates.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_charges_use_beneficiary_as_sender() {
        let (service, _, _) = service();

        let created = service.create_payment(request("USD", "GBP")).await.unwrap();
        let charges = stored(&service, created.id).await.attributes.charges_information;

        assert_eq!(charges.bearer_code, "SHAR");
        assert_eq!(
            charges.sender_charges,
            vec![Charge::new(2.0, "USD"), Charge::new(1.0, "GBP")]
        );
        assert_eq!(charges.receiver_charges_currency, "GBP");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_organisation() {
        let (service, store, _) = service();
        let mut req = request("USD", "GBP");
        req.organisation_id = "  ".into();

        let result = service.create_payment(req).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == CREATE_PARSE_FAILED));
        assert!(store.docs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_zero_amount() {
        let (service, _, _) = service();
        let mut req = request("GBP", "GBP");
        req.amount = 0.0;

        let result = service.create_payment(req).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_storage_failure_is_internal() {
        let (service, store, _) = service();
        store.offline.store(true, Ordering::SeqCst);

        let result = service.create_payment(request("GBP", "GBP")).await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == CREATE_FAILED));
    }

    #[tokio::test]
    async fn test_create_reports_provider_failure() {
        let (service, store, _) = service_with(MockRates::failing(|| QuoteError::Timeout));

        let result = service.create_payment(request("USD", "GBP")).await;

        assert!(matches!(result, Err(AppError::Upstream(QuoteError::Timeout))));
        assert!(store.docs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unusable_rate() {
        let (service, _, _) = service_with(MockRates::new(0.0));

        let result = service.create_payment(request("USD", "GBP")).await;

        assert!(matches!(
            result,
            Err(AppError::Upstream(QuoteError::InvalidResponse(_)))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_returns_all_in_order() {
        let (service, _, _) = service();
        let first = service.create_payment(request("GBP", "GBP")).await.unwrap();
        let second = service.create_payment(request("USD", "GBP")).await.unwrap();

        let collection = service.list_payments().await.unwrap();

        let ids: Vec<_> = collection.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(collection.links.self_link, payments_model::PAYMENTS_SELF_LINK);
    }

    #[tokio::test]
    async fn test_get_missing_or_malformed_is_not_found() {
        let (service, _, _) = service();

        let missing = service.get_payment(&PaymentId::new().to_hex()).await;
        let malformed = service.get_payment("not-an-id").await;

        assert!(matches!(missing, Err(AppError::NotFound(None))));
        assert!(matches!(malformed, Err(AppError::NotFound(None))));
    }

    #[tokio::test]
    async fn test_get_storage_failure_is_internal() {
        let (service, store, _) = service();
        store.offline.store(true, Ordering::SeqCst);

        let result = service.get_payment(&PaymentId::new().to_hex()).await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == QUERY_FAILED));
    }

    #[tokio::test]
    async fn test_collection_scopes_documents() {
        let store = Arc::new(MockStore::default());
        let service = PaymentService::new(
            store.clone(),
            Arc::new(MockRates::new(2.0)),
            Arc::new(EchoCharges),
        )
        .with_collection(Collection::new("TestDB", "Archive"));

        service.create_payment(request("GBP", "GBP")).await.unwrap();

        let docs = store.docs.lock().unwrap();
        assert_eq!(docs[0].0, Collection::new("TestDB", "Archive"));
        assert_eq!(service.collection().to_string(), "TestDB.Archive");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Update
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_replaces_and_keeps_id() {
        let (service, _, _) = service();
        let created = service.create_payment(request("GBP", "GBP")).await.unwrap();

        let mut req = request("USD", "GBP");
        req.debtor_party.account_number = "99999999".into();
        service.update_payment(&created.id.to_hex(), req).await.unwrap();

        let payment = stored(&service, created.id).await;
        assert_eq!(payment.id, created.id);
        assert_eq!(payment.version, 0);
        assert_eq!(payment.attributes.debtor_party.account_number, "99999999");
        assert_eq!(payment.attributes.amount, 100.21);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, _, _) = service();

        let result = service
            .update_payment(&PaymentId::new().to_hex(), request("GBP", "GBP"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(Some(msg))) if msg == UPDATE_FAILED));
    }

    #[tokio::test]
    async fn test_update_malformed_id_is_not_found() {
        let (service, _, _) = service();

        let result = service.update_payment("xyz", request("GBP", "GBP")).await;

        assert!(matches!(result, Err(AppError::NotFound(Some(_)))));
    }

    #[tokio::test]
    async fn test_update_invalid_request_is_bad_request() {
        let (service, _, _) = service();
        let mut req = request("GBP", "GBP");
        req.bearer_code.clear();

        let result = service.update_payment(&PaymentId::new().to_hex(), req).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == UPDATE_PARSE_FAILED));
    }

    #[tokio::test]
    async fn test_update_storage_failure_is_internal() {
        let (service, store, _) = service();
        store.offline.store(true, Ordering::SeqCst);

        let result = service
            .update_payment(&PaymentId::new().to_hex(), request("GBP", "GBP"))
            .await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == UPDATE_FAILED));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _, _) = service();
        let created = service.create_payment(request("GBP", "GBP")).await.unwrap();
        let id = created.id.to_hex();

        service.delete_payment(&id).await.unwrap();

        assert!(matches!(
            service.get_payment(&id).await,
            Err(AppError::NotFound(None))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (service, _, _) = service();

        let result = service.delete_payment(&PaymentId::new().to_hex()).await;

        assert!(matches!(result, Err(AppError::NotFound(None))));
    }

    #[tokio::test]
    async fn test_delete_failure_after_check_is_internal() {
        let (service, store, _) = service();
        let created = service.create_payment(request("GBP", "GBP")).await.unwrap();
        store.fail_deletes.store(true, Ordering::SeqCst);

        let result = service.delete_payment(&created.id.to_hex()).await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == DELETE_FAILED));
    }
}
