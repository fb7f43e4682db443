//! Closed code lists shared across the eCH schemas.

use openmun_serde_support::coded_enum;

coded_enum! {
    /// Canton abbreviation (eCH-0007 `cantonAbbreviationType`).
    pub enum Canton {
        Zh = "ZH",
        Be = "BE",
        Lu = "LU",
        Ur = "UR",
        Sz = "SZ",
        Ow = "OW",
        Nw = "NW",
        Gl = "GL",
        Zg = "ZG",
        Fr = "FR",
        So = "SO",
        Bs = "BS",
        Bl = "BL",
        Sh = "SH",
        Ar = "AR",
        Ai = "AI",
        Sg = "SG",
        Gr = "GR",
        Ag = "AG",
        Tg = "TG",
        Ti = "TI",
        Vd = "VD",
        Vs = "VS",
        Ne = "NE",
        Ge = "GE",
        Ju = "JU",
    }
}

coded_enum! {
    /// Canton abbreviation including the Principality of Liechtenstein.
    pub enum CantonFl {
        Zh = "ZH",
        Be = "BE",
        Lu = "LU",
        Ur = "UR",
        Sz = "SZ",
        Ow = "OW",
        Nw = "NW",
        Gl = "GL",
        Zg = "ZG",
        Fr = "FR",
        So = "SO",
        Bs = "BS",
        Bl = "BL",
        Sh = "SH",
        Ar = "AR",
        Ai = "AI",
        Sg = "SG",
        Gr = "GR",
        Ag = "AG",
        Tg = "TG",
        Ti = "TI",
        Vd = "VD",
        Vs = "VS",
        Ne = "NE",
        Ge = "GE",
        Ju = "JU",
        Fl = "FL",
    }
}

coded_enum! {
    /// eCH-0010 salutation.
    pub enum MrMrs {
        Mrs = "1",
        Mr = "2",
        Unknown = "3",
    }
}

coded_enum! {
    /// eCH-0044 sex.
    pub enum Sex {
        Male = "1",
        Female = "2",
        Unknown = "3",
    }
}

coded_enum! {
    /// eCH-0058 header action.
    pub enum Action {
        Create = "1",
        Modify = "3",
        Cancel = "4",
        Close = "5",
        Reactivate = "6",
        Send = "8",
        Change = "9",
        Confirm = "10",
        Request = "12",
    }
}

coded_enum! {
    /// eCH-0011 marital status.
    pub enum MaritalStatus {
        Single = "1",
        Married = "2",
        Widowed = "3",
        Divorced = "4",
        Unmarried = "5",
        RegisteredPartnership = "6",
        DissolvedPartnership = "7",
        Unknown = "9",
    }
}

coded_enum! {
    pub enum SeparationType {
        Factual = "1",
        Judicial = "2",
    }
}

coded_enum! {
    /// Reason a partnership ended (eCH-0011 `partnershipAbolitionType`).
    pub enum CancelationReason {
        JudicialDissolution = "1",
        Annulment = "2",
        DeclaredMissing = "3",
        Death = "4",
        Unknown = "9",
    }
}

coded_enum! {
    pub enum NationalityStatus {
        Unknown = "0",
        Stateless = "1",
        Known = "2",
    }
}

coded_enum! {
    pub enum TypeOfHousehold {
        Unknown = "0",
        Private = "1",
        Collective = "2",
        Administrative = "3",
    }
}

coded_enum! {
    /// Correspondence language (ISO 639-1 subset used by the registers).
    pub enum Language {
        German = "de",
        French = "fr",
        Italian = "it",
        Romansh = "rm",
        English = "en",
    }
}

coded_enum! {
    /// eCH-0020 data lock on a person record.
    pub enum DataLock {
        NoLock = "0",
        AddressLock = "1",
        InformationLock = "2",
    }
}
