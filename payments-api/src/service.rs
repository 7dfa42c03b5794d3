//! Payment Application Service
//!
//! Orchestrates quotes, assembly and persistence through the ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use payments_model::{
    AppError, ChargesInformation, ChargesProvider, Collection, CreatePaymentRequest,
    CreatePaymentResponse, ExchangeRateProvider, ForeignExchange, Payment, PaymentCollection,
    PaymentId, PaymentStore, QuoteError, StoreError,
};

pub const DATABASE_NAME: &str = "PaymentDB";
pub const COLLECTION_NAME: &str = "Payment";

pub const CREATE_PARSE_FAILED: &str = "Failed to parse payment request";
pub const UPDATE_PARSE_FAILED: &str = "Failed to parse update payment request";
pub const CREATE_FAILED: &str = "Failed to create payment";
pub const QUERY_ALL_FAILED: &str = "Failed to query payments";
pub const QUERY_FAILED: &str = "Failed to query payment";
pub const UPDATE_FAILED: &str = "Failed to update payment";
pub const DELETE_FAILED: &str = "Failed to delete payment";

/// Application service for payment operations.
///
/// Generic over `S: PaymentStore` - the store adapter is injected at compile
/// time. Quote providers are trait objects so fixed and HTTP variants can be
/// chosen from configuration.
pub struct PaymentService<S: PaymentStore> {
    store: S,
    fx: Arc<dyn ExchangeRateProvider>,
    charges: Arc<dyn ChargesProvider>,
    collection: Collection,
}

impl<S: PaymentStore> PaymentService<S> {
    /// Creates a service writing to `PaymentDB.Payment`.
    pub fn new(
        store: S,
        fx: Arc<dyn ExchangeRateProvider>,
        charges: Arc<dyn ChargesProvider>,
    ) -> Self {
        Self {
            store,
            fx,
            charges,
            collection: Collection::new(DATABASE_NAME, COLLECTION_NAME),
        }
    }

    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Quotes, assembles and stores a new payment under a fresh id.
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, AppError> {
        validate(&req, CREATE_PARSE_FAILED)?;

        let (amount, fx, charges) = self.quote(&req).await?;
        let payment = Payment::assemble(PaymentId::new(), amount, fx, charges, &req);

        tracing::info!(payment_id = %payment.id, "Storing payment");
        self.store
            .insert(&self.collection, &payment)
            .await
            .map_err(|e| storage_failure(e, CREATE_FAILED))?;

        Ok(CreatePaymentResponse::from(&payment))
    }

    /// Lists every stored payment, unpaginated.
    pub async fn list_payments(&self) -> Result<PaymentCollection, AppError> {
        let payments = self
            .store
            .find_all(&self.collection)
            .await
            .map_err(|e| storage_failure(e, QUERY_ALL_FAILED))?;

        Ok(PaymentCollection::new(payments))
    }

    /// Gets one payment, wrapped in a single-element collection.
    ///
    /// Malformed and unknown ids are both reported as not found.
    pub async fn get_payment(&self, id: &str) -> Result<PaymentCollection, AppError> {
        let id = parse_id(id)?;

        let payment = self
            .store
            .find(&self.collection, id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppError::NotFound(None),
                other => storage_failure(other, QUERY_FAILED),
            })?;

        Ok(PaymentCollection::new(vec![payment]))
    }

    /// Replaces a payment, recomputing every attribute from `req`.
    ///
    /// The id in the path is kept; the version stays 0.
    pub async fn update_payment(&self, id: &str, req: CreatePaymentRequest) -> Result<(), AppError> {
        validate(&req, UPDATE_PARSE_FAILED)?;
        let id: PaymentId = id
            .parse()
            .map_err(|_| AppError::NotFound(Some(UPDATE_FAILED.into())))?;

        let (amount, fx, charges) = self.quote(&req).await?;
        let payment = Payment::assemble(id, amount, fx, charges, &req);

        tracing::info!(payment_id = %id, "Updating payment");
        self.store
            .update(&self.collection, id, &payment)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppError::NotFound(Some(UPDATE_FAILED.into())),
                other => storage_failure(other, UPDATE_FAILED),
            })
    }

    /// Deletes a payment after confirming it exists.
    ///
    /// The check and the delete are separate store calls; a concurrent
    /// delete in between surfaces as an internal error.
    pub async fn delete_payment(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;

        self.store
            .find(&self.collection, id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppError::NotFound(None),
                other => storage_failure(other, DELETE_FAILED),
            })?;

        self.store
            .delete(&self.collection, id)
            .await
            .map_err(|e| storage_failure(e, DELETE_FAILED))?;

        tracing::info!(payment_id = %id, "Payment successfully deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Quotes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converted amount, rate record and charges for a request.
    ///
    /// The rate provider is only asked when the parties' currencies differ;
    /// otherwise the identity rate is used. Charges are always requested.
    async fn quote(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<(f64, ForeignExchange, ChargesInformation), AppError> {
        let beneficiary_currency = &req.beneficiary_party.currency;
        let debtor_currency = &req.debtor_party.currency;

        let fx = if req.requires_foreign_exchange() {
            let fx = self
                .fx
                .get_rate(beneficiary_currency, debtor_currency, req.amount)
                .await
                .map_err(upstream_failure)?;
            if !fx.is_usable() {
                return Err(upstream_failure(QuoteError::InvalidResponse(format!(
                    "unusable exchange rate {}",
                    fx.exchange_rate
                ))));
            }
            fx
        } else {
            ForeignExchange::identity()
        };

        let amount = fx.convert(req.amount);

        let charges = self
            .charges
            .get_charges(
                fx.exchange_rate,
                &req.bearer_code,
                beneficiary_currency,
                debtor_currency,
            )
            .await
            .map_err(upstream_failure)?;

        Ok((amount, fx, charges))
    }
}

fn validate(req: &CreatePaymentRequest, message: &str) -> Result<(), AppError> {
    req.validate().map_err(|e| {
        tracing::error!(error = %e, "Rejected payment request");
        AppError::BadRequest(message.into())
    })
}

fn parse_id(id: &str) -> Result<PaymentId, AppError> {
    id.parse::<PaymentId>().map_err(AppError::from)
}

fn storage_failure(err: StoreError, message: &str) -> AppError {
    tracing::error!(error = %err, "{}", message);
    AppError::Internal(message.into())
}

fn upstream_failure(err: QuoteError) -> AppError {
    tracing::error!(error = %err, "Quote provider failed");
    AppError::Upstream(err)
}
