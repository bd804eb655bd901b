#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic: malformed JSON and invalid drafts are both fine.
        if let Ok(draft) = invoice_total::core::InvoiceDraft::from_json(s) {
            if let Ok(invoice) = draft.validate() {
                let req = invoice_total::submit::InvoiceRequest::from_invoice(&invoice);
                let _ = req.to_json();
            }
        }
    }
});
