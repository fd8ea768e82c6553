//! Askama templates for the service's XML documents.
//!
//! Templates use the `xml` extension: caller-supplied values (results,
//! fault messages) are escaped, the service's own names are marked `safe`.

use askama::Template;

use crate::soap::{PARAMETERS, SERVICE_NS, SOAP_ENV_NS};

use super::call::Operation;

/// Successful call response.
#[derive(Template)]
#[template(
    ext = "xml",
    source = r#"<?xml version='1.0' encoding='UTF-8'?>
<soap11env:Envelope xmlns:soap11env="{{ soap_ns|safe }}" xmlns:tns="{{ namespace|safe }}"><soap11env:Body><tns:{{ operation|safe }}Response><tns:{{ operation|safe }}Result>{{ value }}</tns:{{ operation|safe }}Result></tns:{{ operation|safe }}Response></soap11env:Body></soap11env:Envelope>"#
)]
pub struct ResponseEnvelope {
    pub soap_ns: &'static str,
    pub namespace: &'static str,
    pub operation: &'static str,
    pub value: String,
}

impl ResponseEnvelope {
    pub fn new(operation: Operation, value: String) -> Self {
        Self {
            soap_ns: SOAP_ENV_NS,
            namespace: SERVICE_NS,
            operation: operation.name(),
            value,
        }
    }
}

/// SOAP 1.1 fault response.
#[derive(Template)]
#[template(
    ext = "xml",
    source = r#"<?xml version='1.0' encoding='UTF-8'?>
<soap11env:Envelope xmlns:soap11env="{{ soap_ns|safe }}"><soap11env:Body><soap11env:Fault><faultcode>soap11env:{{ code|safe }}</faultcode><faultstring>{{ message }}</faultstring><faultactor></faultactor></soap11env:Fault></soap11env:Body></soap11env:Envelope>"#
)]
pub struct FaultEnvelope {
    pub soap_ns: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl FaultEnvelope {
    pub fn new(code: &'static str, message: String) -> Self {
        Self {
            soap_ns: SOAP_ENV_NS,
            code,
            message,
        }
    }
}

/// One operation as described in the WSDL.
pub struct OperationView {
    pub name: &'static str,
    pub result_type: &'static str,
}

/// WSDL 1.1 description of the service (document/literal wrapped).
#[derive(Template)]
#[template(
    ext = "xml",
    source = r#"<?xml version='1.0' encoding='UTF-8'?>
<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/" xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:tns="{{ namespace|safe }}" targetNamespace="{{ namespace|safe }}" name="VehiculeElectriqueService">
  <wsdl:types>
    <xs:schema targetNamespace="{{ namespace|safe }}" elementFormDefault="qualified">
{%- for op in operations %}
      <xs:element name="{{ op.name|safe }}">
        <xs:complexType>
          <xs:sequence>
{%- for param in parameters %}
            <xs:element name="{{ param|safe }}" type="xs:float" minOccurs="0" nillable="true"/>
{%- endfor %}
          </xs:sequence>
        </xs:complexType>
      </xs:element>
      <xs:element name="{{ op.name|safe }}Response">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="{{ op.name|safe }}Result" type="{{ op.result_type|safe }}" minOccurs="0" nillable="true"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
{%- endfor %}
    </xs:schema>
  </wsdl:types>
{%- for op in operations %}
  <wsdl:message name="{{ op.name|safe }}">
    <wsdl:part name="{{ op.name|safe }}" element="tns:{{ op.name|safe }}"/>
  </wsdl:message>
  <wsdl:message name="{{ op.name|safe }}Response">
    <wsdl:part name="{{ op.name|safe }}Response" element="tns:{{ op.name|safe }}Response"/>
  </wsdl:message>
{%- endfor %}
  <wsdl:portType name="VehiculeElectriqueService">
{%- for op in operations %}
    <wsdl:operation name="{{ op.name|safe }}">
      <wsdl:input name="{{ op.name|safe }}" message="tns:{{ op.name|safe }}"/>
      <wsdl:output name="{{ op.name|safe }}Response" message="tns:{{ op.name|safe }}Response"/>
    </wsdl:operation>
{%- endfor %}
  </wsdl:portType>
  <wsdl:binding name="VehiculeElectriqueService" type="tns:VehiculeElectriqueService">
    <soap:binding style="document" transport="http://schemas.xmlsoap.org/soap/http"/>
{%- for op in operations %}
    <wsdl:operation name="{{ op.name|safe }}">
      <soap:operation soapAction="{{ op.name|safe }}" style="document"/>
      <wsdl:input name="{{ op.name|safe }}"><soap:body use="literal"/></wsdl:input>
      <wsdl:output name="{{ op.name|safe }}Response"><soap:body use="literal"/></wsdl:output>
    </wsdl:operation>
{%- endfor %}
  </wsdl:binding>
  <wsdl:service name="VehiculeElectriqueService">
    <wsdl:port name="VehiculeElectriqueService" binding="tns:VehiculeElectriqueService">
      <soap:address location="{{ location|safe }}"/>
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#
)]
pub struct WsdlTemplate {
    pub namespace: &'static str,
    pub location: String,
    pub parameters: [&'static str; 4],
    pub operations: Vec<OperationView>,
}

impl WsdlTemplate {
    pub fn new(location: String) -> Self {
        Self {
            namespace: SERVICE_NS,
            location,
            parameters: PARAMETERS,
            operations: Operation::ALL
                .iter()
                .map(|op| OperationView {
                    name: op.name(),
                    result_type: op.result_type(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::{ExtractedTotal, extract};
    use crate::soap::xml::{Document, NameMatch};

    #[test]
    fn response_envelope_is_understood_by_the_client() {
        let xml = ResponseEnvelope::new(Operation::TripTime, "7.0".into())
            .render()
            .unwrap();
        assert_eq!(extract(&xml).unwrap(), ExtractedTotal::Total(7.0));
    }

    #[test]
    fn fault_envelope_escapes_message() {
        let xml = FaultEnvelope::new("Client", "bad <input> & more".into())
            .render()
            .unwrap();
        assert!(xml.contains("bad &lt;input&gt; &amp; more"));
        assert_eq!(
            extract(&xml).unwrap(),
            ExtractedTotal::Fault {
                message: "bad <input> & more".into()
            }
        );
    }

    #[test]
    fn wsdl_describes_both_operations() {
        let xml = WsdlTemplate::new("http://127.0.0.1:8000/".into())
            .render()
            .unwrap();
        let doc = Document::parse(&xml);
        assert!(doc.is_well_formed());
        assert!(xml.contains(r#"<wsdl:operation name="calculerTempsTrajet">"#));
        assert!(xml.contains(r#"<wsdl:operation name="calculerTempsTrajetDetaillee">"#));
        assert!(xml.contains(r#"<soap:address location="http://127.0.0.1:8000/"/>"#));
        assert!(doc.find("xs:schema", NameMatch::Qualified).is_some());
    }
}
