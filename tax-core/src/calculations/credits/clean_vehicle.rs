//! Clean vehicle credits (Form 8936) for new and previously owned vehicles.

use rust_decimal::Decimal;
use tracing::debug;

use super::CreditContext;
use crate::VehicleCondition;

pub fn clean_vehicle_credit(ctx: &CreditContext<'_>) -> Decimal {
    let Some(purchase) = &ctx.tax_return.credits.clean_vehicle else {
        return Decimal::ZERO;
    };

    let limits = &ctx.config.clean_vehicle;
    let status = ctx.filing_status();

    match purchase.condition {
        VehicleCondition::New => {
            let magi_limit = *limits.new_vehicle_magi_limit.get(status);
            if ctx.modified_agi > magi_limit {
                debug!(magi = %ctx.modified_agi, %magi_limit, "new clean vehicle over income limit");
                return Decimal::ZERO;
            }
            purchase
                .certified_credit
                .max(Decimal::ZERO)
                .min(limits.new_vehicle_max)
        }
        VehicleCondition::Used => {
            let magi_limit = *limits.used_vehicle_magi_limit.get(status);
            if ctx.modified_agi > magi_limit || purchase.sale_price > limits.used_vehicle_price_cap
            {
                debug!(
                    magi = %ctx.modified_agi,
                    price = %purchase.sale_price,
                    "used clean vehicle does not qualify"
                );
                return Decimal::ZERO;
            }
            (purchase.sale_price.max(Decimal::ZERO) * limits.used_vehicle_rate)
                .min(limits.used_vehicle_max)
        }
    }
}
