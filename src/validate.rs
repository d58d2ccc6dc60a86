use crate::error::OrderError;
use crate::models::{NormalizedOrder, OrderRequest};

/// Checks field presence and phone shape. Pure, no I/O, safe to call twice.
///
/// The number is normalized by stripping every whitespace character, then must
/// be the 2-digit country code `91` followed by a 10-digit subscriber number.
pub fn validate(req: &OrderRequest) -> Result<NormalizedOrder, OrderError> {
    if req.customer_name.is_empty()
        || req.whatsapp_number.is_empty()
        || req.address.is_empty()
        || req.timing.is_empty()
        || req.orders.is_empty()
    {
        return Err(OrderError::MissingFields);
    }

    let number: String = req
        .whatsapp_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if !is_valid_indian_mobile(&number) {
        return Err(OrderError::InvalidPhone);
    }

    Ok(NormalizedOrder {
        customer_name: req.customer_name.clone(),
        whatsapp_number: number,
        address: req.address.clone(),
        timing: req.timing.clone(),
        orders: req.orders.clone(),
    })
}

fn is_valid_indian_mobile(number: &str) -> bool {
    number.len() == 12 && number.starts_with("91") && number.chars().all(|c| c.is_ascii_digit())
}
