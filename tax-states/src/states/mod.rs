//! One module per taxable jurisdiction.
//!
//! Each module holds its configuration for every supported year and a
//! `register` function adding its calculators to a [`StateRegistry`].

use crate::registry::StateRegistry;

pub mod alabama;
pub mod arizona;
pub mod arkansas;
pub mod california;
pub mod colorado;
pub mod connecticut;
pub mod delaware;
pub mod district_of_columbia;
pub mod georgia;
pub mod hawaii;
pub mod idaho;
pub mod illinois;
pub mod indiana;
pub mod iowa;
pub mod kansas;
pub mod kentucky;
pub mod louisiana;
pub mod maine;
pub mod maryland;
pub mod massachusetts;
pub mod michigan;
pub mod minnesota;
pub mod mississippi;
pub mod missouri;
pub mod montana;
pub mod nebraska;
pub mod new_jersey;
pub mod new_mexico;
pub mod new_york;
pub mod north_carolina;
pub mod north_dakota;
pub mod ohio;
pub mod oklahoma;
pub mod oregon;
pub mod pennsylvania;
pub mod rhode_island;
pub mod south_carolina;
pub mod utah;
pub mod vermont;
pub mod virginia;
pub mod west_virginia;
pub mod wisconsin;

/// Registers every shipped state calculator.
pub fn register_all(registry: &mut StateRegistry) {
    alabama::register(registry);
    arizona::register(registry);
    arkansas::register(registry);
    california::register(registry);
    colorado::register(registry);
    connecticut::register(registry);
    delaware::register(registry);
    district_of_columbia::register(registry);
    georgia::register(registry);
    hawaii::register(registry);
    idaho::register(registry);
    illinois::register(registry);
    indiana::register(registry);
    iowa::register(registry);
    kansas::register(registry);
    kentucky::register(registry);
    louisiana::register(registry);
    maine::register(registry);
    maryland::register(registry);
    massachusetts::register(registry);
    michigan::register(registry);
    minnesota::register(registry);
    mississippi::register(registry);
    missouri::register(registry);
    montana::register(registry);
    nebraska::register(registry);
    new_jersey::register(registry);
    new_mexico::register(registry);
    new_york::register(registry);
    north_carolina::register(registry);
    north_dakota::register(registry);
    ohio::register(registry);
    oklahoma::register(registry);
    oregon::register(registry);
    pennsylvania::register(registry);
    rhode_island::register(registry);
    south_carolina::register(registry);
    utah::register(registry);
    vermont::register(registry);
    virginia::register(registry);
    west_virginia::register(registry);
    wisconsin::register(registry);
}
