use serde::Serialize;
use serde_json::Value;

/// latest values held by the receiver
///
/// every field starts unset and is only ever overwritten, never cleared.
/// values are kept exactly as they arrived in the payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurrentReading {
    pub temperature: Option<Value>,
    pub moisture: Option<Value>,
    pub disease: Option<Value>,
    pub probability: Option<Value>,
}

/// temperature + moisture pair from the soil sensor
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSample {
    pub temperature: Value,
    pub moisture: Value,
}

/// disease label + probability pair from the plant-health check
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseVerdict {
    pub disease: Value,
    pub probability: Value,
}

/// whether a payload carried a complete field-group
#[derive(Clone, Debug, PartialEq)]
pub enum GroupUpdate<T> {
    Present(T),
    Absent,
}

impl<T> GroupUpdate<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, GroupUpdate::Present(_))
    }
}

/// the two field-groups probed out of one ingest payload
#[derive(Clone, Debug, PartialEq)]
pub struct Ingest {
    pub sensor: GroupUpdate<SensorSample>,
    pub disease: GroupUpdate<DiseaseVerdict>,
}

impl Ingest {
    /// probe a payload for `temp`+`moisture` and `disease`+`probability`
    ///
    /// a group is present only when both of its keys exist. anything that is
    /// not a json object carries no groups.
    pub fn extract(payload: &Value) -> Self {
        let Some(object) = payload.as_object() else {
            return Self { sensor: GroupUpdate::Absent, disease: GroupUpdate::Absent };
        };

        let sensor = match (object.get("temp"), object.get("moisture")) {
            (Some(temperature), Some(moisture)) => GroupUpdate::Present(SensorSample {
                temperature: temperature.clone(),
                moisture: moisture.clone(),
            }),
            _ => GroupUpdate::Absent,
        };

        let disease = match (object.get("disease"), object.get("probability")) {
            (Some(disease), Some(probability)) => GroupUpdate::Present(DiseaseVerdict {
                disease: disease.clone(),
                probability: probability.clone(),
            }),
            _ => GroupUpdate::Absent,
        };

        Self { sensor, disease }
    }

    pub fn is_empty(&self) -> bool {
        !self.sensor.is_present() && !self.disease.is_present()
    }
}

impl CurrentReading {
    /// overwrite each group the update carries, leave the rest alone
    pub fn apply(&mut self, update: &Ingest) {
        if let GroupUpdate::Present(sample) = &update.sensor {
            self.temperature = Some(sample.temperature.clone());
            self.moisture = Some(sample.moisture.clone());
        }
        if let GroupUpdate::Present(verdict) = &update.disease {
            self.disease = Some(verdict.disease.clone());
            self.probability = Some(verdict.probability.clone());
        }
    }
}
