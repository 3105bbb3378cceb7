//! Checkout route handlers.
//!
//! The form posts normally (no HTMX) so a successful order can redirect.
//! While the request is in flight the client script shows the
//! `Submitting` label and disables the button.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use comforty_core::{CheckoutPhase, FieldErrors, ShippingField, ShippingForm};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::CspNonce;
use crate::notifications::{CHECKOUT_FAILED, ORDER_PLACED, Toast, set_flash, take_flash};
use crate::services::{CheckoutOutcome, SessionCart, submit_order};
use crate::state::AppState;

/// One shipping input for templates.
#[derive(Clone)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub autocomplete: &'static str,
    pub value: String,
    pub error: Option<&'static str>,
}

impl FieldView {
    fn new(field: ShippingField, form: &ShippingForm, errors: &FieldErrors) -> Self {
        let (input_type, autocomplete) = match field {
            ShippingField::Name => ("text", "name"),
            ShippingField::Email => ("email", "email"),
            ShippingField::Phone => ("tel", "tel"),
            ShippingField::Address => ("text", "street-address"),
            ShippingField::City => ("text", "address-level2"),
            ShippingField::State => ("text", "address-level1"),
            ShippingField::ZipCode => ("text", "postal-code"),
        };
        Self {
            key: field.key(),
            label: field.label(),
            input_type,
            autocomplete,
            value: form.value(field).to_string(),
            error: errors.get(field),
        }
    }

    /// Every field in form order.
    fn all(form: &ShippingForm, errors: &FieldErrors) -> Vec<Self> {
        ShippingField::ALL
            .into_iter()
            .map(|field| Self::new(field, form, errors))
            .collect()
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub fields: Vec<FieldView>,
    pub summary: CartView,
    pub phase: CheckoutPhase,
    pub submitting_label: &'static str,
    pub toast: Option<Toast>,
    pub nonce: String,
}

impl CheckoutTemplate {
    fn idle(
        form: &ShippingForm,
        errors: &FieldErrors,
        cart: &SessionCart,
        toast: Option<Toast>,
        nonce: String,
    ) -> Self {
        Self {
            fields: FieldView::all(form, errors),
            summary: CartView::from(cart),
            phase: CheckoutPhase::Idle,
            submitting_label: CheckoutPhase::Submitting.button_label(),
            toast,
            nonce,
        }
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/thankyou.html")]
pub struct ThankYouTemplate {
    pub toast: Option<Toast>,
    pub nonce: String,
}

/// Display the checkout form and order summary.
#[instrument(skip_all)]
pub async fn show(session: Session, cart: SessionCart, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    let toast = take_flash(&session).await;
    CheckoutTemplate::idle(
        &ShippingForm::default(),
        &FieldErrors::default(),
        &cart,
        toast,
        nonce,
    )
}

/// Place the order.
///
/// - Invalid form: 422 with per-field messages and the entered values.
/// - Placed: success flash and 303 to `/thankyou`.
/// - Failed: the form again with the error toast; the cart is kept.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    mut cart: SessionCart,
    Form(form): Form<ShippingForm>,
) -> Response {
    let entered = form.clone();

    match submit_order(&mut cart, state.orders(), form).await {
        CheckoutOutcome::Invalid(errors, form) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutTemplate::idle(&form, &errors, &cart, None, nonce),
        )
            .into_response(),
        CheckoutOutcome::Placed(order) => {
            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("order_id", order.id.to_string().as_str())]),
            );
            if let Err(e) = set_flash(&session, &Toast::success(ORDER_PLACED)).await {
                tracing::warn!(error = %e, "Failed to store order confirmation flash");
            }
            Redirect::to("/thankyou").into_response()
        }
        CheckoutOutcome::Failed(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Checkout failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CheckoutTemplate::idle(
                    &entered,
                    &FieldErrors::default(),
                    &cart,
                    Some(Toast::error(CHECKOUT_FAILED)),
                    nonce,
                ),
            )
                .into_response()
        }
    }
}

/// Order confirmation page. Shows the success toast once.
#[instrument(skip_all)]
pub async fn thank_you(session: Session, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    ThankYouTemplate {
        toast: take_flash(&session).await,
        nonce,
    }
}
