//! # UPS Carrier Client
//!
//! Live shipping quotes via the UPS shipment-creation API.
//!
//! Creates a non-validated shipment with fixed package and service
//! parameters and reads the total charge plus the label image out of the
//! response. The monetary value is the one field the pipeline cannot live
//! without; its absence is a [`CarrierError::MalformedResponse`].
//!
//! Transit time is a randomized 5-8 day estimate drawn through the shared
//! [`Jitter`] seam; the shipment response itself carries no transit data.

use crate::application::services::estimator::{randomized_transit_days, Jitter};
use crate::domain::entities::address::{Address, AddressPair};
use crate::domain::value_objects::{Carrier, Cost};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::HttpClient;
use crate::infrastructure::carriers::traits::{CarrierClient, CarrierQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shipment API version segment in the request path.
const SHIP_API_VERSION: &str = "2";

/// Configuration for the UPS client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsConfig {
    /// API base URL, e.g. `https://onlinetools.ups.com`.
    pub base_url: String,
    /// Bounded timeout for every outbound call, in milliseconds.
    pub timeout_ms: u64,
    /// UPS shipper account used on the shipment.
    pub shipper_number: String,
    /// Billing account for shipment charges.
    pub account_number: String,
}

impl Default for UpsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://onlinetools.ups.com".to_owned(),
            timeout_ms: 10_000,
            shipper_number: String::new(),
            account_number: String::new(),
        }
    }
}

/// UPS implementation of [`CarrierClient`].
#[derive(Clone)]
pub struct UpsClient {
    http: HttpClient,
    config: UpsConfig,
    jitter: Arc<dyn Jitter>,
}

impl fmt::Debug for UpsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl UpsClient {
    /// Creates a UPS client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn new(config: UpsConfig, jitter: Arc<dyn Jitter>) -> CarrierResult<Self> {
        let http = HttpClient::new(config.timeout_ms)?;
        Ok(Self {
            http,
            config,
            jitter,
        })
    }

    fn ship_url(&self) -> String {
        format!(
            "{}/api/shipments/{}/ship",
            self.config.base_url.trim_end_matches('/'),
            SHIP_API_VERSION
        )
    }

    fn build_request(&self, pair: &AddressPair) -> ShipmentRequestBody {
        ShipmentRequestBody {
            shipment_request: ShipmentRequest {
                request: RequestOptions {
                    sub_version: "1801".to_owned(),
                    request_option: "nonvalidate".to_owned(),
                    transaction_reference: TransactionReference {
                        customer_context: String::new(),
                    },
                },
                shipment: Shipment {
                    description: String::new(),
                    shipper: Shipper {
                        name: pair.sender().name().to_owned(),
                        phone: Phone {
                            number: pair.sender().phone().to_owned(),
                        },
                        shipper_number: self.config.shipper_number.clone(),
                        address: WireAddress::from(pair.sender()),
                    },
                    ship_to: ShipTo {
                        name: pair.receiver().name().to_owned(),
                        phone: Phone {
                            number: pair.receiver().phone().to_owned(),
                        },
                        address: WireAddress::from(pair.receiver()),
                    },
                    payment_information: PaymentInformation {
                        shipment_charge: ShipmentCharge {
                            charge_type: "01".to_owned(),
                            bill_shipper: BillShipper {
                                account_number: self.config.account_number.clone(),
                            },
                        },
                    },
                    service: Service {
                        code: "03".to_owned(),
                        description: "Express".to_owned(),
                    },
                    package: Package::default(),
                },
            },
        }
    }
}

#[async_trait]
impl CarrierClient for UpsClient {
    fn carrier(&self) -> Carrier {
        Carrier::Ups
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms
    }

    async fn create_shipment(
        &self,
        access_token: &str,
        pair: &AddressPair,
    ) -> CarrierResult<CarrierQuote> {
        let payload = self.build_request(pair);
        let body: ShipResponseBody = self
            .http
            .post_json(&self.ship_url(), access_token, &payload)
            .await?;

        let results = body
            .shipment_response
            .and_then(|r| r.shipment_results)
            .ok_or_else(|| {
                CarrierError::malformed_response("shipment results not found in the response")
            })?;

        let monetary_value = results
            .shipment_charges
            .and_then(|c| c.total_charges)
            .and_then(|t| t.monetary_value)
            .ok_or_else(|| {
                CarrierError::malformed_response("total charges not found in the response")
            })?;

        let total_cost: Cost = monetary_value.parse().map_err(|e| {
            CarrierError::malformed_response(format!("invalid total charges: {}", e))
        })?;

        let label_image = results
            .package_results
            .and_then(|packages| packages.into_iter().next())
            .and_then(|p| p.shipping_label)
            .and_then(|l| l.graphic_image);

        Ok(CarrierQuote::new(
            total_cost,
            label_image,
            randomized_transit_days(self.jitter.as_ref()),
        ))
    }
}

// Wire types for the shipment-creation request.

#[derive(Debug, Serialize)]
struct ShipmentRequestBody {
    #[serde(rename = "ShipmentRequest")]
    shipment_request: ShipmentRequest,
}

#[derive(Debug, Serialize)]
struct ShipmentRequest {
    #[serde(rename = "Request")]
    request: RequestOptions,
    #[serde(rename = "Shipment")]
    shipment: Shipment,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    #[serde(rename = "SubVersion")]
    sub_version: String,
    #[serde(rename = "RequestOption")]
    request_option: String,
    #[serde(rename = "TransactionReference")]
    transaction_reference: TransactionReference,
}

#[derive(Debug, Serialize)]
struct TransactionReference {
    #[serde(rename = "CustomerContext")]
    customer_context: String,
}

#[derive(Debug, Serialize)]
struct Shipment {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Shipper")]
    shipper: Shipper,
    #[serde(rename = "ShipTo")]
    ship_to: ShipTo,
    #[serde(rename = "PaymentInformation")]
    payment_information: PaymentInformation,
    #[serde(rename = "Service")]
    service: Service,
    #[serde(rename = "Package")]
    package: Package,
}

#[derive(Debug, Serialize)]
struct Shipper {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Phone")]
    phone: Phone,
    #[serde(rename = "ShipperNumber")]
    shipper_number: String,
    #[serde(rename = "Address")]
    address: WireAddress,
}

#[derive(Debug, Serialize)]
struct ShipTo {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Phone")]
    phone: Phone,
    #[serde(rename = "Address")]
    address: WireAddress,
}

#[derive(Debug, Serialize)]
struct Phone {
    #[serde(rename = "Number")]
    number: String,
}

#[derive(Debug, Serialize)]
struct WireAddress {
    #[serde(rename = "AddressLine")]
    address_line: Vec<String>,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "StateProvinceCode")]
    state_province_code: String,
    #[serde(rename = "PostalCode")]
    postal_code: String,
    #[serde(rename = "CountryCode")]
    country_code: String,
}

impl From<&Address> for WireAddress {
    fn from(address: &Address) -> Self {
        Self {
            address_line: vec![address.addr().to_owned()],
            city: address.city().to_owned(),
            state_province_code: address.state().to_owned(),
            postal_code: address.zip().to_owned(),
            country_code: "US".to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PaymentInformation {
    #[serde(rename = "ShipmentCharge")]
    shipment_charge: ShipmentCharge,
}

#[derive(Debug, Serialize)]
struct ShipmentCharge {
    #[serde(rename = "Type")]
    charge_type: String,
    #[serde(rename = "BillShipper")]
    bill_shipper: BillShipper,
}

#[derive(Debug, Serialize)]
struct BillShipper {
    #[serde(rename = "AccountNumber")]
    account_number: String,
}

#[derive(Debug, Serialize)]
struct Service {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Debug, Serialize)]
struct Package {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Packaging")]
    packaging: Packaging,
    #[serde(rename = "Dimensions")]
    dimensions: Dimensions,
    #[serde(rename = "PackageWeight")]
    package_weight: PackageWeight,
}

impl Default for Package {
    fn default() -> Self {
        Self {
            description: " ".to_owned(),
            packaging: Packaging {
                code: "02".to_owned(),
                description: "Package".to_owned(),
            },
            dimensions: Dimensions {
                unit_of_measurement: UnitOfMeasurement {
                    code: "IN".to_owned(),
                    description: "Inches".to_owned(),
                },
                length: "10".to_owned(),
                width: "30".to_owned(),
                height: "45".to_owned(),
            },
            package_weight: PackageWeight {
                unit_of_measurement: UnitOfMeasurement {
                    code: "LBS".to_owned(),
                    description: "Pounds".to_owned(),
                },
                weight: "5".to_owned(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Packaging {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Debug, Serialize)]
struct Dimensions {
    #[serde(rename = "UnitOfMeasurement")]
    unit_of_measurement: UnitOfMeasurement,
    #[serde(rename = "Length")]
    length: String,
    #[serde(rename = "Width")]
    width: String,
    #[serde(rename = "Height")]
    height: String,
}

#[derive(Debug, Serialize)]
struct UnitOfMeasurement {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Debug, Serialize)]
struct PackageWeight {
    #[serde(rename = "UnitOfMeasurement")]
    unit_of_measurement: UnitOfMeasurement,
    #[serde(rename = "Weight")]
    weight: String,
}

// Wire types for the shipment-creation response.

#[derive(Debug, Deserialize)]
struct ShipResponseBody {
    #[serde(rename = "ShipmentResponse")]
    shipment_response: Option<ShipmentResponse>,
}

#[derive(Debug, Deserialize)]
struct ShipmentResponse {
    #[serde(rename = "ShipmentResults")]
    shipment_results: Option<ShipmentResults>,
}

#[derive(Debug, Deserialize)]
struct ShipmentResults {
    #[serde(rename = "ShipmentCharges")]
    shipment_charges: Option<ShipmentCharges>,
    #[serde(rename = "PackageResults")]
    package_results: Option<Vec<PackageResult>>,
}

#[derive(Debug, Deserialize)]
struct ShipmentCharges {
    #[serde(rename = "TotalCharges")]
    total_charges: Option<TotalCharges>,
}

#[derive(Debug, Deserialize)]
struct TotalCharges {
    #[serde(rename = "MonetaryValue")]
    monetary_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageResult {
    #[serde(rename = "ShippingLabel")]
    shipping_label: Option<ShippingLabel>,
}

#[derive(Debug, Deserialize)]
struct ShippingLabel {
    #[serde(rename = "GraphicImage")]
    graphic_image: Option<String>,
}
