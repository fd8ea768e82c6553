//! Request envelope construction.

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Target namespace of the electric-vehicle service.
pub const SERVICE_NS: &str = "vehicule.electrique.soap";

/// Operation computing the total trip time.
pub const OPERATION: &str = "calculerTempsTrajet";

/// Parameter element names, in the order the service expects them.
pub const PARAMETERS: [&str; 4] = ["distance", "vitesse", "autonomie", "temps_chargement"];

/// Build the `calculerTempsTrajet` request envelope.
///
/// Values are written as-is; validation happens in the client.
pub fn build_envelope(distance: f64, speed: f64, range: f64, recharge_minutes: f64) -> String {
    let [p_distance, p_speed, p_range, p_recharge] = PARAMETERS;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="{SOAP_ENV_NS}" xmlns:tns="{SERVICE_NS}">
    <soap:Body>
        <tns:{OPERATION}>
            <tns:{p_distance}>{distance}</tns:{p_distance}>
            <tns:{p_speed}>{speed}</tns:{p_speed}>
            <tns:{p_range}>{range}</tns:{p_range}>
            <tns:{p_recharge}>{recharge_minutes}</tns:{p_recharge}>
        </tns:{OPERATION}>
    </soap:Body>
</soap:Envelope>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::xml::{Document, NameMatch};

    #[test]
    fn envelope_carries_operation_and_namespaces() {
        let xml = build_envelope(600.0, 100.0, 300.0, 30.0);
        assert!(xml.contains(r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains(r#"xmlns:tns="vehicule.electrique.soap""#));
        assert!(xml.contains("<tns:calculerTempsTrajet>"));
    }

    #[test]
    fn parameters_appear_in_order() {
        let xml = build_envelope(600.0, 100.0, 300.0, 30.5);
        let positions: Vec<usize> = [
            "<tns:distance>600</tns:distance>",
            "<tns:vitesse>100</tns:vitesse>",
            "<tns:autonomie>300</tns:autonomie>",
            "<tns:temps_chargement>30.5</tns:temps_chargement>",
        ]
        .iter()
        .map(|needle| xml.find(needle).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn envelope_is_well_formed() {
        let doc = Document::parse(&build_envelope(1.5, 2.5, 3.5, 0.0));
        assert!(doc.is_well_formed());

        let op = doc
            .find("calculerTempsTrajet", NameMatch::AnyNamespace)
            .unwrap();
        assert_eq!(doc.local_name(doc.first_child(op).unwrap()), "distance");
    }
}
