//! Core types for TPMS frames and records

use crate::config::OutputFields;
use crate::constants::{
    sum8, StatusFlags, CHECKSUM_COVERAGE, FRAME_LEN, MIC, MODEL, SENSOR_TYPE, TEMPERATURE_OFFSET,
};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Eight bytes extracted after a preamble: 7 payload bytes and a SUM8 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawFrame(pub [u8; FRAME_LEN]);

impl RawFrame {
    /// Wrap extracted bytes
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Checksum byte carried in the frame
    pub fn checksum(&self) -> u8 {
        self.0[CHECKSUM_COVERAGE]
    }

    /// Checksum computed over the payload bytes
    pub fn computed_checksum(&self) -> u8 {
        sum8(&self.0[..CHECKSUM_COVERAGE])
    }

    /// Check the SUM8 integrity of the frame
    pub fn is_valid(&self) -> bool {
        self.checksum() == self.computed_checksum()
    }

    /// Sensor identifier (bytes 0-2, big-endian)
    pub fn id(&self) -> u32 {
        u32::from_be_bytes([0, self.0[0], self.0[1], self.0[2]])
    }

    /// Raw pressure (bytes 3-4, big-endian)
    pub fn pressure(&self) -> u16 {
        u16::from_be_bytes([self.0[3], self.0[4]])
    }

    /// Raw temperature byte
    pub fn raw_temperature(&self) -> u8 {
        self.0[5]
    }

    /// Status byte
    pub fn status(&self) -> StatusFlags {
        StatusFlags::new(self.0[6])
    }

    /// 16 uppercase hex digits
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02X}", b)).collect()
    }
}

/// A validated sensor reading
///
/// Serializes with the fields in the order consumers expect:
/// `model`, `type`, `id`, `status`, `pressure`, `temperature`, `raw`, `mic`.
/// Deserializing rebuilds the frame bytes from `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    /// Sensor family
    pub model: String,

    /// Always "TPMS"
    #[serde(rename = "type")]
    pub sensor_type: String,

    /// Sensor identifier, 6 uppercase hex digits
    pub id: String,

    /// Status byte as `0b` followed by 8 binary digits
    pub status: String,

    /// Raw pressure, PSI scale, uncalibrated
    pub pressure: u16,

    /// Degrees Celsius (provisional offset)
    pub temperature: i16,

    /// The frame as 16 uppercase hex digits
    pub raw: String,

    /// Integrity method
    pub mic: String,

    /// Extracted frame bytes
    #[serde(skip)]
    pub frame: RawFrame,
}

impl DecodedRecord {
    /// Map a frame whose checksum has already been verified
    pub fn from_frame(frame: RawFrame) -> Self {
        Self {
            model: MODEL.to_string(),
            sensor_type: SENSOR_TYPE.to_string(),
            id: format!("{:06X}", frame.id()),
            status: format!("0b{:08b}", frame.status().as_u8()),
            pressure: frame.pressure(),
            temperature: frame.raw_temperature() as i16 - TEMPERATURE_OFFSET,
            raw: frame.to_hex(),
            mic: MIC.to_string(),
            frame,
        }
    }

    /// Numeric sensor identifier
    pub fn sensor_id(&self) -> u32 {
        self.frame.id()
    }

    /// Decoded status bits
    pub fn flags(&self) -> StatusFlags {
        self.frame.status()
    }

    /// Field values rendered as text, in emission order
    pub fn field_values(&self) -> [String; 8] {
        [
            self.model.clone(),
            self.sensor_type.clone(),
            self.id.clone(),
            self.status.clone(),
            self.pressure.to_string(),
            self.temperature.to_string(),
            self.raw.clone(),
            self.mic.clone(),
        ]
    }

    /// Pair configured field names with their values
    pub fn labelled<'a>(&self, fields: &'a OutputFields) -> Vec<(&'a str, String)> {
        fields
            .0
            .iter()
            .map(String::as_str)
            .zip(self.field_values())
            .collect()
    }
}

/// Serialized form of a [`DecodedRecord`]
#[derive(Deserialize)]
struct RecordFields {
    model: String,
    #[serde(rename = "type")]
    sensor_type: String,
    id: String,
    status: String,
    pressure: u16,
    temperature: i16,
    raw: String,
    mic: String,
}

impl<'de> Deserialize<'de> for DecodedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = RecordFields::deserialize(deserializer)?;
        let bytes = hex::decode(&fields.raw).map_err(D::Error::custom)?;
        let frame: [u8; FRAME_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(bytes.len(), &"8 frame bytes in `raw`"))?;

        Ok(Self {
            model: fields.model,
            sensor_type: fields.sensor_type,
            id: fields.id,
            status: fields.status,
            pressure: fields.pressure,
            temperature: fields.temperature,
            raw: fields.raw,
            mic: fields.mic,
            frame: RawFrame::new(frame),
        })
    }
}

impl Default for RawFrame {
    fn default() -> Self {
        Self([0u8; FRAME_LEN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::StatusCode;

    #[test]
    fn test_field_mapping() {
        let frame = RawFrame::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x64, 0x00, 0x0E]);
        assert!(frame.is_valid());

        let record = DecodedRecord::from_frame(frame);
        assert_eq!(record.id, "001122");
        assert_eq!(record.pressure, 13124);
        assert_eq!(record.temperature, 50);
        assert_eq!(record.status, "0b00000000");
        assert_eq!(record.raw, "001122334464000E");
        assert_eq!(record.mic, "SUM8");
        assert_eq!(record.sensor_id(), 0x001122);
    }

    #[test]
    fn test_negative_temperature_and_flags() {
        let frame = RawFrame::new([0xAB, 0xCD, 0xEF, 0x00, 0x1F, 0x0A, 0x8E, 0x00]);
        let record = DecodedRecord::from_frame(frame);
        assert_eq!(record.id, "ABCDEF");
        assert_eq!(record.temperature, -40);
        assert_eq!(record.status, "0b10001110");
        assert!(record.flags().low_battery());
        assert!(record.flags().rolling());
        assert_eq!(record.flags().code(), StatusCode::NormalDriving);
    }

    #[test]
    fn test_labelled_fields() {
        let frame = RawFrame::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x64, 0x00, 0x0E]);
        let record = DecodedRecord::from_frame(frame);
        let fields = OutputFields::default();
        let labelled = record.labelled(&fields);

        assert_eq!(labelled.len(), 8);
        assert_eq!(labelled[0], ("model", "Subaru".to_string()));
        assert_eq!(labelled[4], ("pressure", "13124".to_string()));
        assert_eq!(labelled[7], ("mic", "SUM8".to_string()));
    }

    #[test]
    fn test_deserialized_record_keeps_frame() {
        let frame = RawFrame::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x64, 0x8E, 0x9C]);
        assert!(frame.is_valid());
        let record = DecodedRecord::from_frame(frame);

        let json = serde_json::to_string(&record).unwrap();
        let back: DecodedRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
        assert_eq!(back.sensor_id(), 0x001122);
        assert!(back.flags().low_battery());
        assert_eq!(back.frame, frame);
    }

    #[test]
    fn test_deserialize_rejects_bad_raw() {
        let short = r#"{"model":"Subaru","type":"TPMS","id":"001122","status":"0b00000000","pressure":13124,"temperature":50,"raw":"0011","mic":"SUM8"}"#;
        assert!(serde_json::from_str::<DecodedRecord>(short).is_err());

        let not_hex = short.replace("\"raw\":\"0011\"", "\"raw\":\"zz\"");
        assert!(serde_json::from_str::<DecodedRecord>(&not_hex).is_err());
    }

    #[test]
    fn test_serialized_field_order() {
        let frame = RawFrame::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x64, 0x00, 0x0E]);
        let json = serde_json::to_string(&DecodedRecord::from_frame(frame)).unwrap();
        assert_eq!(
            json,
            r#"{"model":"Subaru","type":"TPMS","id":"001122","status":"0b00000000","pressure":13124,"temperature":50,"raw":"001122334464000E","mic":"SUM8"}"#
        );
    }
}
