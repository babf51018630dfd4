//! Complaint entity - the customer report that opens an analysis

use serde::{Deserialize, Serialize};

/// A customer quality complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    /// Complaint number (e.g., "CMP-2024-0147")
    pub id: String,

    /// Product model the complaint concerns
    pub product_model: String,

    /// Part number of the failed assembly
    pub part_number: String,

    /// Serial number of the returned unit
    pub serial_number: String,

    /// Defect classification as reported
    pub defect_type: String,

    /// Free-text description from the customer
    pub description: String,

    /// Date the complaint was reported (free text, as entered)
    pub reported_date: String,

    /// Reporting customer
    pub customer: String,
}

/// The seven editable fields of the intake form
///
/// Values are taken as typed; empty strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintForm {
    pub product_model: String,
    pub part_number: String,
    pub serial_number: String,
    pub defect_type: String,
    pub description: String,
    pub customer: String,
    pub reported_date: String,
}

/// Form field identifiers in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductModel,
    PartNumber,
    SerialNumber,
    DefectType,
    Customer,
    ReportedDate,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::ProductModel,
        FormField::PartNumber,
        FormField::SerialNumber,
        FormField::DefectType,
        FormField::Customer,
        FormField::ReportedDate,
        FormField::Description,
    ];

    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            FormField::ProductModel => "Product Model",
            FormField::PartNumber => "Part Number",
            FormField::SerialNumber => "Serial Number",
            FormField::DefectType => "Defect Type",
            FormField::Customer => "Customer",
            FormField::ReportedDate => "Report Date",
            FormField::Description => "Description",
        }
    }
}

impl ComplaintForm {
    /// Form pre-filled from an existing complaint
    pub fn prefilled(complaint: &Complaint) -> Self {
        Self {
            product_model: complaint.product_model.clone(),
            part_number: complaint.part_number.clone(),
            serial_number: complaint.serial_number.clone(),
            defect_type: complaint.defect_type.clone(),
            description: complaint.description.clone(),
            customer: complaint.customer.clone(),
            reported_date: complaint.reported_date.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ProductModel => &self.product_model,
            FormField::PartNumber => &self.part_number,
            FormField::SerialNumber => &self.serial_number,
            FormField::DefectType => &self.defect_type,
            FormField::Customer => &self.customer,
            FormField::ReportedDate => &self.reported_date,
            FormField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::ProductModel => self.product_model = value,
            FormField::PartNumber => self.part_number = value,
            FormField::SerialNumber => self.serial_number = value,
            FormField::DefectType => self.defect_type = value,
            FormField::Customer => self.customer = value,
            FormField::ReportedDate => self.reported_date = value,
            FormField::Description => self.description = value,
        }
    }

    /// The submitted form as label/value pairs, in display order
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        FormField::ALL
            .iter()
            .map(|f| (f.label(), self.get(*f)))
            .collect()
    }

    /// Build a complaint record from the form under the given number
    pub fn into_complaint(self, id: impl Into<String>) -> Complaint {
        Complaint {
            id: id.into(),
            product_model: self.product_model,
            part_number: self.part_number,
            serial_number: self.serial_number,
            defect_type: self.defect_type,
            description: self.description,
            reported_date: self.reported_date,
            customer: self.customer,
        }
    }
}
