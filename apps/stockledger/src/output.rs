use stockledger_domain::services::performance::PriceChange;
use stockledger_domain::value_objects::transaction::Transaction;

pub const NO_LISTING_FOR_COMPANY: &str =
    "THERE DOES NOT APPEAR TO BE A STOCK VALUE LISTING FOR THAT COMPANY";

pub const MAIN_MENU: &str = "\
----------------------
       MAIN MENU
----------------------
1) PRINT ALL TRANSACTIONS FOR A SPECIFIC STOCK
2) GET STOCK PRICE AT SPECIFIC TIME
3) GET CHANGE IN STOCK PRICE OVER TIME
4) DETERMINE STOCK WITH BEST PERFORMANCE OVER TIME
5) EXIT PROGRAM
";

pub fn missing_file(location: &str) -> String {
    format!("{location} FILE DOES NOT EXIST - PLEASE CHECK YOUR WORKING FOLDER")
}

/// Fixed-width listing: ticker left in 5 columns, time and value right in 9.
pub fn transaction_listing(records: &[Transaction]) -> String {
    let mut text = String::from("COMPANY   TIME    VALUE\n-------   ----    -----\n");
    for record in records {
        text.push_str(&format!(
            "{:<5}{:>9}{:>9.2}\n",
            record.company, record.time, record.price
        ));
    }
    text
}

pub fn price_at_time(price: Option<f64>) -> String {
    match price {
        Some(value) => format!("THE STOCK VALUE AT THAT TIME IS: ${value:.2}"),
        None => NO_LISTING_FOR_COMPANY.to_string(),
    }
}

pub fn price_change(change: Option<&PriceChange>) -> String {
    match change {
        Some(change) => format!(
            "THE STARTING STOCK VALUE IS: ${:.2}\nTHE ENDING STOCK VALUE IS:   ${:.2}\n\nTHE DIFFERENCE IN PRICE IS:  {:.2}%",
            change.start_price, change.end_price, change.change_pct
        ),
        None => NO_LISTING_FOR_COMPANY.to_string(),
    }
}
