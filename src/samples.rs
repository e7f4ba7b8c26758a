//! Sample fragments and styles for tests and demonstration.

/// Simple invoice-style fragment with a heading and a totals table.
pub fn invoice_fragment() -> &'static str {
    r##"
<div class="invoice">
    <h1>Invoice #2024-001</h1>
    <table>
        <tr><th>Item</th><th>Qty</th><th>Total</th></tr>
        <tr><td>Web Development</td><td>40</td><td>$6,000.00</td></tr>
        <tr><td>Design Services</td><td>20</td><td>$2,500.00</td></tr>
    </table>
    <p class="total">Total: $8,500.00</p>
</div>
"##
}

/// Minimal fragment for unit testing.
pub fn minimal_fragment() -> &'static str {
    r#"<div><h1>Title</h1><p>Body text</p></div>"#
}

/// A small report stylesheet to layer over the base style.
pub fn report_style() -> &'static str {
    r##"
h1 { font-size: 20px; margin-bottom: 8px; }
.total { font-weight: bold; text-align: right; }
.invoice th { background: #eee; }
"##
}

/// A script template exercising substitution and producer directives.
pub fn receipt_template_source() -> &'static str {
    r#"<div class="receipt">
<h1>{{ store }}</h1>
<p>Order {{ order.number }} for {{ order.customer }}</p>
{% rule 16 %}
<p>Total: {{ order.total }}</p>
</div>"#
}
