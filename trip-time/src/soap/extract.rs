//! Response extraction.
//!
//! The service's response layout is not guaranteed to be stable, so the
//! total is looked up through an ordered list of locators, first hit wins.
//! A SOAP fault anywhere in the document takes precedence over any result.

use tracing::{debug, warn};

use super::error::ExtractionError;
use super::xml::{Document, NameMatch, NodeId};

/// Message used when a fault carries no `faultstring`.
pub const DEFAULT_FAULT_MESSAGE: &str = "SOAP fault";

/// What a response body resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedTotal {
    /// Total trip time in hours
    Total(f64),
    /// The service reported an error in-band
    Fault { message: String },
}

/// One way of locating the result element.
#[derive(Debug, Clone, Copy)]
struct Locator {
    /// Element that must enclose the result, looked up first.
    wrapper: Option<&'static str>,
    element: &'static str,
    mode: NameMatch,
}

const RESULT_LOCATORS: &[Locator] = &[
    Locator {
        wrapper: None,
        element: "calculerTempsTrajetResult",
        mode: NameMatch::Qualified,
    },
    Locator {
        wrapper: None,
        element: "calculerTempsTrajetResult",
        mode: NameMatch::AnyNamespace,
    },
    Locator {
        wrapper: Some("calculerTempsTrajetResponse"),
        element: "calculerTempsTrajetResult",
        mode: NameMatch::Qualified,
    },
    // Minimally-typed responses
    Locator {
        wrapper: None,
        element: "float",
        mode: NameMatch::Qualified,
    },
];

const FAULT_PASSES: [NameMatch; 2] = [NameMatch::Qualified, NameMatch::AnyNamespace];

impl Locator {
    fn locate(&self, doc: &Document) -> Option<NodeId> {
        match self.wrapper {
            Some(wrapper) => {
                let scope = doc.find(wrapper, self.mode)?;
                doc.find_within(scope, self.element, self.mode)
            }
            None => doc.find(self.element, self.mode),
        }
    }
}

/// Resolve a raw response body to a total or a fault.
pub fn extract(raw: &str) -> Result<ExtractedTotal, ExtractionError> {
    debug!(raw, "received SOAP response");

    let doc = Document::parse(raw);
    if let Some(error) = doc.error() {
        debug!(error, "response is not well-formed, searching partial tree");
    }

    if let Some(fault) = FAULT_PASSES.iter().find_map(|&mode| doc.find("Fault", mode)) {
        let message = FAULT_PASSES
            .iter()
            .find_map(|&mode| doc.find_within(fault, "faultstring", mode))
            .map(|id| doc.text(id).trim())
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_FAULT_MESSAGE)
            .to_string();
        warn!(%message, "service returned a SOAP fault");
        return Ok(ExtractedTotal::Fault { message });
    }

    let Some((index, node)) = RESULT_LOCATORS
        .iter()
        .enumerate()
        .find_map(|(index, locator)| locator.locate(&doc).map(|node| (index, node)))
    else {
        warn!("no result element in SOAP response");
        return Err(ExtractionError::NoResult);
    };

    let text = doc.text(node).trim();
    let value = text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ExtractionError::NotANumber {
            text: text.to_string(),
        })?;

    if value < 0.0 {
        return Err(ExtractionError::NegativeTotal { value });
    }

    debug!(value, strategy = index, "extracted total");
    Ok(ExtractedTotal::Total(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"<?xml version="1.0"?>
<Envelope><Body><calculerTempsTrajetResponse>
<calculerTempsTrajetResult>7.0</calculerTempsTrajetResult>
</calculerTempsTrajetResponse></Body></Envelope>"#;

    const NAMESPACED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap11env:Envelope xmlns:soap11env="http://schemas.xmlsoap.org/soap/envelope/" xmlns:tns="vehicule.electrique.soap">
  <soap11env:Body>
    <tns:calculerTempsTrajetResponse>
      <tns:calculerTempsTrajetResult>7.0</tns:calculerTempsTrajetResult>
    </tns:calculerTempsTrajetResponse>
  </soap11env:Body>
</soap11env:Envelope>"#;

    const WRAPPED: &str = "<r><calculerTempsTrajetResponse><calculerTempsTrajetResult>7</calculerTempsTrajetResult></calculerTempsTrajetResponse></r>";

    const FLOAT_ONLY: &str = r#"<Envelope><Body><answer><float>7.0</float><float>9.0</float></answer></Body></Envelope>"#;

    const PLAIN_FAULT: &str = r#"<Envelope><Body><Fault>
<faultcode>Client</faultcode><faultstring>Paramètres invalides</faultstring>
</Fault><calculerTempsTrajetResult>7.0</calculerTempsTrajetResult></Body></Envelope>"#;

    const NAMESPACED_FAULT: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
<soap:Body><soap:Fault><soap:faultcode>soap:Server</soap:faultcode><soap:faultstring>division by zero</soap:faultstring></soap:Fault>
<tns:calculerTempsTrajetResult xmlns:tns="urn:x">7.0</tns:calculerTempsTrajetResult></soap:Body></soap:Envelope>"#;

    #[test]
    fn every_layout_yields_the_same_total() {
        let layouts = [
            ("plain result", PLAIN),
            ("namespaced result", NAMESPACED),
            ("wrapped result", WRAPPED),
            ("float element", FLOAT_ONLY),
        ];
        for (label, raw) in layouts {
            assert_eq!(
                extract(raw).unwrap(),
                ExtractedTotal::Total(7.0),
                "layout: {label}"
            );
        }
    }

    #[test]
    fn each_locator_matches_its_layout() {
        let cases = [(0, PLAIN), (1, NAMESPACED), (2, WRAPPED), (3, FLOAT_ONLY)];
        for (index, raw) in cases {
            let doc = Document::parse(raw);
            assert!(RESULT_LOCATORS[index].locate(&doc).is_some(), "locator {index}");
        }
    }

    #[test]
    fn namespaced_result_only_matches_wildcard_locator() {
        let doc = Document::parse(NAMESPACED);
        let hits: Vec<bool> = RESULT_LOCATORS
            .iter()
            .map(|locator| locator.locate(&doc).is_some())
            .collect();
        assert_eq!(hits, [false, true, false, false]);
    }

    #[test]
    fn plain_fault_wins_over_result() {
        assert_eq!(
            extract(PLAIN_FAULT).unwrap(),
            ExtractedTotal::Fault {
                message: "Paramètres invalides".into()
            }
        );
    }

    #[test]
    fn namespaced_fault_wins_over_result() {
        assert_eq!(
            extract(NAMESPACED_FAULT).unwrap(),
            ExtractedTotal::Fault {
                message: "division by zero".into()
            }
        );
    }

    #[test]
    fn fault_without_message_uses_default() {
        let raw = "<Envelope><Body><Fault><faultcode>Server</faultcode></Fault></Body></Envelope>";
        assert_eq!(
            extract(raw).unwrap(),
            ExtractedTotal::Fault {
                message: DEFAULT_FAULT_MESSAGE.into()
            }
        );
    }

    #[test]
    fn unknown_layout_is_an_error() {
        let raw = "<Envelope><Body><somethingElse>7.0</somethingElse></Body></Envelope>";
        assert_eq!(extract(raw), Err(ExtractionError::NoResult));
        assert_eq!(extract(""), Err(ExtractionError::NoResult));
        assert_eq!(extract("not xml at all"), Err(ExtractionError::NoResult));
    }

    #[test]
    fn non_numeric_total_is_rejected() {
        let raw = "<r><calculerTempsTrajetResult>soon</calculerTempsTrajetResult></r>";
        assert_eq!(
            extract(raw),
            Err(ExtractionError::NotANumber {
                text: "soon".into()
            })
        );

        let raw = "<r><calculerTempsTrajetResult>NaN</calculerTempsTrajetResult></r>";
        assert!(matches!(
            extract(raw),
            Err(ExtractionError::NotANumber { .. })
        ));
    }

    #[test]
    fn negative_sentinel_is_rejected() {
        let raw = "<r><calculerTempsTrajetResult>-1.0</calculerTempsTrajetResult></r>";
        assert_eq!(
            extract(raw),
            Err(ExtractionError::NegativeTotal { value: -1.0 })
        );
    }

    #[test]
    fn malformed_response_is_searched_leniently() {
        let raw = "<Envelope><Body><calculerTempsTrajetResult> 2.75 </calculerTempsTrajetResult></Oops>";
        assert_eq!(extract(raw).unwrap(), ExtractedTotal::Total(2.75));
    }

    #[test]
    fn first_float_in_document_order_is_used() {
        let raw = "<a><b><float>1.5</float></b><float>2.5</float></a>";
        assert_eq!(extract(raw).unwrap(), ExtractedTotal::Total(1.5));
    }
}
