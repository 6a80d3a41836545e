//! Tag constants of the attributes in the standard dictionary,
//! and the dictionary records themselves.
//!
//! Repeating groups (`60xx`) are declared with the `xx` digits zeroed.

use dcmio_core::dictionary::{
    DataDictionaryEntryRef as E,
    TagRange::{Group100, Single},
    VirtualVr::{Exact, Lt, Ox, Px, Xs},
};
use dcmio_core::{Tag, VR};

/// FileMetaInformationGroupLength (0002,0000) UL
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);

/// FileMetaInformationVersion (0002,0001) OB
pub const FILE_META_INFORMATION_VERSION: Tag = Tag(0x0002, 0x0001);

/// MediaStorageSOPClassUID (0002,0002) UI
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);

/// MediaStorageSOPInstanceUID (0002,0003) UI
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);

/// TransferSyntaxUID (0002,0010) UI
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);

/// ImplementationClassUID (0002,0012) UI
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);

/// ImplementationVersionName (0002,0013) SH
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);

/// SourceApplicationEntityTitle (0002,0016) AE
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);

/// PrivateInformationCreatorUID (0002,0100) UI
pub const PRIVATE_INFORMATION_CREATOR_UID: Tag = Tag(0x0002, 0x0100);

/// PrivateInformation (0002,0102) OB
pub const PRIVATE_INFORMATION: Tag = Tag(0x0002, 0x0102);

/// SpecificCharacterSet (0008,0005) CS
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);

/// ImageType (0008,0008) CS
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);

/// InstanceCreationDate (0008,0012) DA
pub const INSTANCE_CREATION_DATE: Tag = Tag(0x0008, 0x0012);

/// InstanceCreationTime (0008,0013) TM
pub const INSTANCE_CREATION_TIME: Tag = Tag(0x0008, 0x0013);

/// SOPClassUID (0008,0016) UI
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);

/// SOPInstanceUID (0008,0018) UI
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);

/// StudyDate (0008,0020) DA
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);

/// SeriesDate (0008,0021) DA
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);

/// AcquisitionDate (0008,0022) DA
pub const ACQUISITION_DATE: Tag = Tag(0x0008, 0x0022);

/// ContentDate (0008,0023) DA
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);

/// AcquisitionDateTime (0008,002A) DT
pub const ACQUISITION_DATE_TIME: Tag = Tag(0x0008, 0x002A);

/// StudyTime (0008,0030) TM
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);

/// SeriesTime (0008,0031) TM
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);

/// ContentTime (0008,0033) TM
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);

/// AccessionNumber (0008,0050) SH
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);

/// Modality (0008,0060) CS
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

/// Manufacturer (0008,0070) LO
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);

/// InstitutionName (0008,0080) LO
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);

/// ReferringPhysicianName (0008,0090) PN
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);

/// CodeValue (0008,0100) SH
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);

/// CodingSchemeDesignator (0008,0102) SH
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);

/// CodeMeaning (0008,0104) LO
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);

/// StudyDescription (0008,1030) LO
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);

/// SeriesDescription (0008,103E) LO
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

/// ManufacturerModelName (0008,1090) LO
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);

/// ReferencedStudySequence (0008,1110) SQ
pub const REFERENCED_STUDY_SEQUENCE: Tag = Tag(0x0008, 0x1110);

/// ReferencedSeriesSequence (0008,1115) SQ
pub const REFERENCED_SERIES_SEQUENCE: Tag = Tag(0x0008, 0x1115);

/// ReferencedImageSequence (0008,1140) SQ
pub const REFERENCED_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x1140);

/// ReferencedSOPClassUID (0008,1150) UI
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);

/// ReferencedSOPInstanceUID (0008,1155) UI
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);

/// ReferencedSOPSequence (0008,1199) SQ
pub const REFERENCED_SOP_SEQUENCE: Tag = Tag(0x0008, 0x1199);

/// SourceImageSequence (0008,2112) SQ
pub const SOURCE_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x2112);

/// DerivationCodeSequence (0008,9215) SQ
pub const DERIVATION_CODE_SEQUENCE: Tag = Tag(0x0008, 0x9215);

/// PatientName (0010,0010) PN
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);

/// PatientID (0010,0020) LO
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);

/// PatientBirthDate (0010,0030) DA
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);

/// PatientSex (0010,0040) CS
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

/// OtherPatientNames (0010,1001) PN
pub const OTHER_PATIENT_NAMES: Tag = Tag(0x0010, 0x1001);

/// PatientAge (0010,1010) AS
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);

/// PatientSize (0010,1020) DS
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);

/// PatientWeight (0010,1030) DS
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);

/// EthnicGroup (0010,2160) SH
pub const ETHNIC_GROUP: Tag = Tag(0x0010, 0x2160);

/// PatientComments (0010,4000) LT
pub const PATIENT_COMMENTS: Tag = Tag(0x0010, 0x4000);

/// BodyPartExamined (0018,0015) CS
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);

/// SliceThickness (0018,0050) DS
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);

/// KVP (0018,0060) DS
pub const KVP: Tag = Tag(0x0018, 0x0060);

/// SpacingBetweenSlices (0018,0088) DS
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);

/// SoftwareVersions (0018,1020) LO
pub const SOFTWARE_VERSIONS: Tag = Tag(0x0018, 0x1020);

/// ProtocolName (0018,1030) LO
pub const PROTOCOL_NAME: Tag = Tag(0x0018, 0x1030);

/// PatientPosition (0018,5100) CS
pub const PATIENT_POSITION: Tag = Tag(0x0018, 0x5100);

/// StudyInstanceUID (0020,000D) UI
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);

/// SeriesInstanceUID (0020,000E) UI
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);

/// StudyID (0020,0010) SH
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);

/// SeriesNumber (0020,0011) IS
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);

/// InstanceNumber (0020,0013) IS
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);

/// ImagePositionPatient (0020,0032) DS
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);

/// ImageOrientationPatient (0020,0037) DS
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);

/// FrameOfReferenceUID (0020,0052) UI
pub const FRAME_OF_REFERENCE_UID: Tag = Tag(0x0020, 0x0052);

/// SliceLocation (0020,1041) DS
pub const SLICE_LOCATION: Tag = Tag(0x0020, 0x1041);

/// ImageComments (0020,4000) LT
pub const IMAGE_COMMENTS: Tag = Tag(0x0020, 0x4000);

/// SamplesPerPixel (0028,0002) US
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);

/// PhotometricInterpretation (0028,0004) CS
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);

/// PlanarConfiguration (0028,0006) US
pub const PLANAR_CONFIGURATION: Tag = Tag(0x0028, 0x0006);

/// NumberOfFrames (0028,0008) IS
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);

/// FrameIncrementPointer (0028,0009) AT
pub const FRAME_INCREMENT_POINTER: Tag = Tag(0x0028, 0x0009);

/// Rows (0028,0010) US
pub const ROWS: Tag = Tag(0x0028, 0x0010);

/// Columns (0028,0011) US
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);

/// PixelSpacing (0028,0030) DS
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);

/// BitsAllocated (0028,0100) US
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);

/// BitsStored (0028,0101) US
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);

/// HighBit (0028,0102) US
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);

/// PixelRepresentation (0028,0103) US
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);

/// SmallestImagePixelValue (0028,0106) US or SS
pub const SMALLEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0106);

/// LargestImagePixelValue (0028,0107) US or SS
pub const LARGEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0107);

/// WindowCenter (0028,1050) DS
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);

/// WindowWidth (0028,1051) DS
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);

/// RescaleIntercept (0028,1052) DS
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);

/// RescaleSlope (0028,1053) DS
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);

/// RedPaletteColorLookupTableDescriptor (0028,1101) US or SS
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1101);

/// RedPaletteColorLookupTableData (0028,1201) OW
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1201);

/// LUTDescriptor (0028,3002) US or SS
pub const LUT_DESCRIPTOR: Tag = Tag(0x0028, 0x3002);

/// LUTData (0028,3006) US, SS or OW
pub const LUT_DATA: Tag = Tag(0x0028, 0x3006);

/// VOILUTSequence (0028,3010) SQ
pub const VOILUT_SEQUENCE: Tag = Tag(0x0028, 0x3010);

/// RequestedProcedureDescription (0032,1060) LO
pub const REQUESTED_PROCEDURE_DESCRIPTION: Tag = Tag(0x0032, 0x1060);

/// RequestAttributesSequence (0040,0275) SQ
pub const REQUEST_ATTRIBUTES_SEQUENCE: Tag = Tag(0x0040, 0x0275);

/// RelationshipType (0040,A010) CS
pub const RELATIONSHIP_TYPE: Tag = Tag(0x0040, 0xA010);

/// ValueType (0040,A040) CS
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);

/// ConceptNameCodeSequence (0040,A043) SQ
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);

/// TextValue (0040,A160) UT
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);

/// ContentSequence (0040,A730) SQ
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);

/// RadiopharmaceuticalInformationSequence (0054,0016) SQ
pub const RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE: Tag = Tag(0x0054, 0x0016);

/// WaveformData (5400,1010) OB or OW
pub const WAVEFORM_DATA: Tag = Tag(0x5400, 0x1010);

/// OverlayRows (6000,0010) US
pub const OVERLAY_ROWS: Tag = Tag(0x6000, 0x0010);

/// OverlayColumns (6000,0011) US
pub const OVERLAY_COLUMNS: Tag = Tag(0x6000, 0x0011);

/// OverlayBitsAllocated (6000,0100) US
pub const OVERLAY_BITS_ALLOCATED: Tag = Tag(0x6000, 0x0100);

/// OverlayData (6000,3000) OB or OW
pub const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);

/// ExtendedOffsetTable (7FE0,0001) OV
pub const EXTENDED_OFFSET_TABLE: Tag = Tag(0x7FE0, 0x0001);

/// ExtendedOffsetTableLengths (7FE0,0002) OV
pub const EXTENDED_OFFSET_TABLE_LENGTHS: Tag = Tag(0x7FE0, 0x0002);

/// FloatPixelData (7FE0,0008) OF
pub const FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0008);

/// DoubleFloatPixelData (7FE0,0009) OD
pub const DOUBLE_FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0009);

/// PixelData (7FE0,0010) OB or OW
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// DigitalSignaturesSequence (FFFA,FFFA) SQ
pub const DIGITAL_SIGNATURES_SEQUENCE: Tag = Tag(0xFFFA, 0xFFFA);

/// DataSetTrailingPadding (FFFC,FFFC) OB
pub const DATA_SET_TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);

/// All records of the standard dictionary.
pub(crate) const ENTRIES: &[E<'static>] = &[
    E { tag: Single(FILE_META_INFORMATION_GROUP_LENGTH), alias: "FileMetaInformationGroupLength", vr: Exact(VR::UL) },
    E { tag: Single(FILE_META_INFORMATION_VERSION), alias: "FileMetaInformationVersion", vr: Exact(VR::OB) },
    E { tag: Single(MEDIA_STORAGE_SOP_CLASS_UID), alias: "MediaStorageSOPClassUID", vr: Exact(VR::UI) },
    E { tag: Single(MEDIA_STORAGE_SOP_INSTANCE_UID), alias: "MediaStorageSOPInstanceUID", vr: Exact(VR::UI) },
    E { tag: Single(TRANSFER_SYNTAX_UID), alias: "TransferSyntaxUID", vr: Exact(VR::UI) },
    E { tag: Single(IMPLEMENTATION_CLASS_UID), alias: "ImplementationClassUID", vr: Exact(VR::UI) },
    E { tag: Single(IMPLEMENTATION_VERSION_NAME), alias: "ImplementationVersionName", vr: Exact(VR::SH) },
    E { tag: Single(SOURCE_APPLICATION_ENTITY_TITLE), alias: "SourceApplicationEntityTitle", vr: Exact(VR::AE) },
    E { tag: Single(PRIVATE_INFORMATION_CREATOR_UID), alias: "PrivateInformationCreatorUID", vr: Exact(VR::UI) },
    E { tag: Single(PRIVATE_INFORMATION), alias: "PrivateInformation", vr: Exact(VR::OB) },
    E { tag: Single(SPECIFIC_CHARACTER_SET), alias: "SpecificCharacterSet", vr: Exact(VR::CS) },
    E { tag: Single(IMAGE_TYPE), alias: "ImageType", vr: Exact(VR::CS) },
    E { tag: Single(INSTANCE_CREATION_DATE), alias: "InstanceCreationDate", vr: Exact(VR::DA) },
    E { tag: Single(INSTANCE_CREATION_TIME), alias: "InstanceCreationTime", vr: Exact(VR::TM) },
    E { tag: Single(SOP_CLASS_UID), alias: "SOPClassUID", vr: Exact(VR::UI) },
    E { tag: Single(SOP_INSTANCE_UID), alias: "SOPInstanceUID", vr: Exact(VR::UI) },
    E { tag: Single(STUDY_DATE), alias: "StudyDate", vr: Exact(VR::DA) },
    E { tag: Single(SERIES_DATE), alias: "SeriesDate", vr: Exact(VR::DA) },
    E { tag: Single(ACQUISITION_DATE), alias: "AcquisitionDate", vr: Exact(VR::DA) },
    E { tag: Single(CONTENT_DATE), alias: "ContentDate", vr: Exact(VR::DA) },
    E { tag: Single(ACQUISITION_DATE_TIME), alias: "AcquisitionDateTime", vr: Exact(VR::DT) },
    E { tag: Single(STUDY_TIME), alias: "StudyTime", vr: Exact(VR::TM) },
    E { tag: Single(SERIES_TIME), alias: "SeriesTime", vr: Exact(VR::TM) },
    E { tag: Single(CONTENT_TIME), alias: "ContentTime", vr: Exact(VR::TM) },
    E { tag: Single(ACCESSION_NUMBER), alias: "AccessionNumber", vr: Exact(VR::SH) },
    E { tag: Single(MODALITY), alias: "Modality", vr: Exact(VR::CS) },
    E { tag: Single(MANUFACTURER), alias: "Manufacturer", vr: Exact(VR::LO) },
    E { tag: Single(INSTITUTION_NAME), alias: "InstitutionName", vr: Exact(VR::LO) },
    E { tag: Single(REFERRING_PHYSICIAN_NAME), alias: "ReferringPhysicianName", vr: Exact(VR::PN) },
    E { tag: Single(CODE_VALUE), alias: "CodeValue", vr: Exact(VR::SH) },
    E { tag: Single(CODING_SCHEME_DESIGNATOR), alias: "CodingSchemeDesignator", vr: Exact(VR::SH) },
    E { tag: Single(CODE_MEANING), alias: "CodeMeaning", vr: Exact(VR::LO) },
    E { tag: Single(STUDY_DESCRIPTION), alias: "StudyDescription", vr: Exact(VR::LO) },
    E { tag: Single(SERIES_DESCRIPTION), alias: "SeriesDescription", vr: Exact(VR::LO) },
    E { tag: Single(MANUFACTURER_MODEL_NAME), alias: "ManufacturerModelName", vr: Exact(VR::LO) },
    E { tag: Single(REFERENCED_STUDY_SEQUENCE), alias: "ReferencedStudySequence", vr: Exact(VR::SQ) },
    E { tag: Single(REFERENCED_SERIES_SEQUENCE), alias: "ReferencedSeriesSequence", vr: Exact(VR::SQ) },
    E { tag: Single(REFERENCED_IMAGE_SEQUENCE), alias: "ReferencedImageSequence", vr: Exact(VR::SQ) },
    E { tag: Single(REFERENCED_SOP_CLASS_UID), alias: "ReferencedSOPClassUID", vr: Exact(VR::UI) },
    E { tag: Single(REFERENCED_SOP_INSTANCE_UID), alias: "ReferencedSOPInstanceUID", vr: Exact(VR::UI) },
    E { tag: Single(REFERENCED_SOP_SEQUENCE), alias: "ReferencedSOPSequence", vr: Exact(VR::SQ) },
    E { tag: Single(SOURCE_IMAGE_SEQUENCE), alias: "SourceImageSequence", vr: Exact(VR::SQ) },
    E { tag: Single(DERIVATION_CODE_SEQUENCE), alias: "DerivationCodeSequence", vr: Exact(VR::SQ) },
    E { tag: Single(PATIENT_NAME), alias: "PatientName", vr: Exact(VR::PN) },
    E { tag: Single(PATIENT_ID), alias: "PatientID", vr: Exact(VR::LO) },
    E { tag: Single(PATIENT_BIRTH_DATE), alias: "PatientBirthDate", vr: Exact(VR::DA) },
    E { tag: Single(PATIENT_SEX), alias: "PatientSex", vr: Exact(VR::CS) },
    E { tag: Single(OTHER_PATIENT_NAMES), alias: "OtherPatientNames", vr: Exact(VR::PN) },
    E { tag: Single(PATIENT_AGE), alias: "PatientAge", vr: Exact(VR::AS) },
    E { tag: Single(PATIENT_SIZE), alias: "PatientSize", vr: Exact(VR::DS) },
    E { tag: Single(PATIENT_WEIGHT), alias: "PatientWeight", vr: Exact(VR::DS) },
    E { tag: Single(ETHNIC_GROUP), alias: "EthnicGroup", vr: Exact(VR::SH) },
    E { tag: Single(PATIENT_COMMENTS), alias: "PatientComments", vr: Exact(VR::LT) },
    E { tag: Single(BODY_PART_EXAMINED), alias: "BodyPartExamined", vr: Exact(VR::CS) },
    E { tag: Single(SLICE_THICKNESS), alias: "SliceThickness", vr: Exact(VR::DS) },
    E { tag: Single(KVP), alias: "KVP", vr: Exact(VR::DS) },
    E { tag: Single(SPACING_BETWEEN_SLICES), alias: "SpacingBetweenSlices", vr: Exact(VR::DS) },
    E { tag: Single(SOFTWARE_VERSIONS), alias: "SoftwareVersions", vr: Exact(VR::LO) },
    E { tag: Single(PROTOCOL_NAME), alias: "ProtocolName", vr: Exact(VR::LO) },
    E { tag: Single(PATIENT_POSITION), alias: "PatientPosition", vr: Exact(VR::CS) },
    E { tag: Single(STUDY_INSTANCE_UID), alias: "StudyInstanceUID", vr: Exact(VR::UI) },
    E { tag: Single(SERIES_INSTANCE_UID), alias: "SeriesInstanceUID", vr: Exact(VR::UI) },
    E { tag: Single(STUDY_ID), alias: "StudyID", vr: Exact(VR::SH) },
    E { tag: Single(SERIES_NUMBER), alias: "SeriesNumber", vr: Exact(VR::IS) },
    E { tag: Single(INSTANCE_NUMBER), alias: "InstanceNumber", vr: Exact(VR::IS) },
    E { tag: Single(IMAGE_POSITION_PATIENT), alias: "ImagePositionPatient", vr: Exact(VR::DS) },
    E { tag: Single(IMAGE_ORIENTATION_PATIENT), alias: "ImageOrientationPatient", vr: Exact(VR::DS) },
    E { tag: Single(FRAME_OF_REFERENCE_UID), alias: "FrameOfReferenceUID", vr: Exact(VR::UI) },
    E { tag: Single(SLICE_LOCATION), alias: "SliceLocation", vr: Exact(VR::DS) },
    E { tag: Single(IMAGE_COMMENTS), alias: "ImageComments", vr: Exact(VR::LT) },
    E { tag: Single(SAMPLES_PER_PIXEL), alias: "SamplesPerPixel", vr: Exact(VR::US) },
    E { tag: Single(PHOTOMETRIC_INTERPRETATION), alias: "PhotometricInterpretation", vr: Exact(VR::CS) },
    E { tag: Single(PLANAR_CONFIGURATION), alias: "PlanarConfiguration", vr: Exact(VR::US) },
    E { tag: Single(NUMBER_OF_FRAMES), alias: "NumberOfFrames", vr: Exact(VR::IS) },
    E { tag: Single(FRAME_INCREMENT_POINTER), alias: "FrameIncrementPointer", vr: Exact(VR::AT) },
    E { tag: Single(ROWS), alias: "Rows", vr: Exact(VR::US) },
    E { tag: Single(COLUMNS), alias: "Columns", vr: Exact(VR::US) },
    E { tag: Single(PIXEL_SPACING), alias: "PixelSpacing", vr: Exact(VR::DS) },
    E { tag: Single(BITS_ALLOCATED), alias: "BitsAllocated", vr: Exact(VR::US) },
    E { tag: Single(BITS_STORED), alias: "BitsStored", vr: Exact(VR::US) },
    E { tag: Single(HIGH_BIT), alias: "HighBit", vr: Exact(VR::US) },
    E { tag: Single(PIXEL_REPRESENTATION), alias: "PixelRepresentation", vr: Exact(VR::US) },
    E { tag: Single(SMALLEST_IMAGE_PIXEL_VALUE), alias: "SmallestImagePixelValue", vr: Xs },
    E { tag: Single(LARGEST_IMAGE_PIXEL_VALUE), alias: "LargestImagePixelValue", vr: Xs },
    E { tag: Single(WINDOW_CENTER), alias: "WindowCenter", vr: Exact(VR::DS) },
    E { tag: Single(WINDOW_WIDTH), alias: "WindowWidth", vr: Exact(VR::DS) },
    E { tag: Single(RESCALE_INTERCEPT), alias: "RescaleIntercept", vr: Exact(VR::DS) },
    E { tag: Single(RESCALE_SLOPE), alias: "RescaleSlope", vr: Exact(VR::DS) },
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR), alias: "RedPaletteColorLookupTableDescriptor", vr: Xs },
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "RedPaletteColorLookupTableData", vr: Exact(VR::OW) },
    E { tag: Single(LUT_DESCRIPTOR), alias: "LUTDescriptor", vr: Xs },
    E { tag: Single(LUT_DATA), alias: "LUTData", vr: Lt },
    E { tag: Single(VOILUT_SEQUENCE), alias: "VOILUTSequence", vr: Exact(VR::SQ) },
    E { tag: Single(REQUESTED_PROCEDURE_DESCRIPTION), alias: "RequestedProcedureDescription", vr: Exact(VR::LO) },
    E { tag: Single(REQUEST_ATTRIBUTES_SEQUENCE), alias: "RequestAttributesSequence", vr: Exact(VR::SQ) },
    E { tag: Single(RELATIONSHIP_TYPE), alias: "RelationshipType", vr: Exact(VR::CS) },
    E { tag: Single(VALUE_TYPE), alias: "ValueType", vr: Exact(VR::CS) },
    E { tag: Single(CONCEPT_NAME_CODE_SEQUENCE), alias: "ConceptNameCodeSequence", vr: Exact(VR::SQ) },
    E { tag: Single(TEXT_VALUE), alias: "TextValue", vr: Exact(VR::UT) },
    E { tag: Single(CONTENT_SEQUENCE), alias: "ContentSequence", vr: Exact(VR::SQ) },
    E { tag: Single(RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE), alias: "RadiopharmaceuticalInformationSequence", vr: Exact(VR::SQ) },
    E { tag: Single(WAVEFORM_DATA), alias: "WaveformData", vr: Ox },
    E { tag: Group100(OVERLAY_ROWS), alias: "OverlayRows", vr: Exact(VR::US) },
    E { tag: Group100(OVERLAY_COLUMNS), alias: "OverlayColumns", vr: Exact(VR::US) },
    E { tag: Group100(OVERLAY_BITS_ALLOCATED), alias: "OverlayBitsAllocated", vr: Exact(VR::US) },
    E { tag: Group100(OVERLAY_DATA), alias: "OverlayData", vr: Ox },
    E { tag: Single(EXTENDED_OFFSET_TABLE), alias: "ExtendedOffsetTable", vr: Exact(VR::OV) },
    E { tag: Single(EXTENDED_OFFSET_TABLE_LENGTHS), alias: "ExtendedOffsetTableLengths", vr: Exact(VR::OV) },
    E { tag: Single(FLOAT_PIXEL_DATA), alias: "FloatPixelData", vr: Exact(VR::OF) },
    E { tag: Single(DOUBLE_FLOAT_PIXEL_DATA), alias: "DoubleFloatPixelData", vr: Exact(VR::OD) },
    E { tag: Single(PIXEL_DATA), alias: "PixelData", vr: Px },
    E { tag: Single(DIGITAL_SIGNATURES_SEQUENCE), alias: "DigitalSignaturesSequence", vr: Exact(VR::SQ) },
    E { tag: Single(DATA_SET_TRAILING_PADDING), alias: "DataSetTrailingPadding", vr: Exact(VR::OB) },
];
