//! HTTP quote clients.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use payments_model::{
    ChargesInformation, ChargesProvider, ExchangeRateProvider, ForeignExchange, QuoteError,
};

use crate::resilience::ResiliencePolicy;

/// Body POSTed to the rate service.
#[derive(Debug, Clone, Serialize)]
pub struct RateQuoteRequest<'a> {
    pub target_currency: &'a str,
    pub source_currency: &'a str,
    pub amount: f64,
}

/// Body POSTed to the charges service.
#[derive(Debug, Clone, Serialize)]
pub struct ChargesQuoteRequest<'a> {
    pub exchange_rate: f64,
    pub bearer_code: &'a str,
    pub sender_currency: &'a str,
    pub receiver_currency: &'a str,
}

/// Rate lookup backed by a remote quote service.
pub struct HttpRateProvider {
    http: reqwest::Client,
    url: String,
    policy: ResiliencePolicy,
}

impl HttpRateProvider {
    pub fn new(http: reqwest::Client, url: impl Into<String>, policy: ResiliencePolicy) -> Self {
        Self {
            http,
            url: url.into(),
            policy,
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for HttpRateProvider {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn get_rate(
        &self,
        target_currency: &str,
        source_currency: &str,
        amount: f64,
    ) -> Result<ForeignExchange, QuoteError> {
        let body = RateQuoteRequest {
            target_currency,
            source_currency,
            amount,
        };
        let fx: ForeignExchange = self
            .policy
            .execute(|| post_json(&self.http, &self.url, &body))
            .await?;

        if !fx.is_usable() {
            return Err(QuoteError::InvalidResponse(format!(
                "unusable exchange rate {}",
                fx.exchange_rate
            )));
        }
        Ok(fx)
    }
}

/// Fee calculation backed by a remote charges service.
pub struct HttpChargesProvider {
    http: reqwest::Client,
    url: String,
    policy: ResiliencePolicy,
}

impl HttpChargesProvider {
    pub fn new(http: reqwest::Client, url: impl Into<String>, policy: ResiliencePolicy) -> Self {
        Self {
            http,
            url: url.into(),
            policy,
        }
    }
}

#[async_trait]
impl ChargesProvider for HttpChargesProvider {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn get_charges(
        &self,
        exchange_rate: f64,
        bearer_code: &str,
        sender_currency: &str,
        receiver_currency: &str,
    ) -> Result<ChargesInformation, QuoteError> {
        let body = ChargesQuoteRequest {
            exchange_rate,
            bearer_code,
            sender_currency,
            receiver_currency,
        };
        self.policy
            .execute(|| post_json(&self.http, &self.url, &body))
            .await
    }
}

async fn post_json<B, T>(http: &reqwest::Client, url: &str, body: &B) -> Result<T, QuoteError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let resp = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(transport_error)?;

    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(QuoteError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    resp.json::<T>()
        .await
        .map_err(|e| QuoteError::InvalidResponse(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        QuoteError::Timeout
    } else {
        QuoteError::Unavailable(err.to_string())
    }
}
