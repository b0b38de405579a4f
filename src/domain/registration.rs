//! Field schema of the "Sinh viên 5 tốt" registration form.
//!
//! The form is one flat record split into six steps. Every field is described
//! by a static [`FieldSpec`] so that rendering, validation and the outbound
//! payload all read from the same table.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use validator::ValidateEmail;

/// Maximum number of characters kept for any answer.
pub const MAX_ANSWER_CHARS: usize = 1000;

pub const REQUIRED_MESSAGE: &str = "Vui lòng nhập thông tin";
pub const NEGATIVE_NUMBER_MESSAGE: &str = "Giá trị phải lớn hơn hoặc bằng 0";
pub const NOT_A_NUMBER_MESSAGE: &str = "Giá trị phải là số";

macro_rules! registration_fields {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Key of a registration form field, serialized with its wire name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum FieldKey {
            $($variant),+
        }

        impl FieldKey {
            pub const ALL: &'static [FieldKey] = &[$(FieldKey::$variant),+];

            /// Name used in the posted form and in the relayed JSON.
            pub const fn name(self) -> &'static str {
                match self {
                    $(FieldKey::$variant => $name),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(FieldKey::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

registration_fields! {
    HoTen => "hoTen",
    Mssv => "mssv",
    Khoa => "khoa",
    Nganh => "nganh",
    Lop => "lop",
    GioiTinh => "gioiTinh",
    NgaySinh => "ngaySinh",
    DanToc => "danToc",
    NgayVaoDangDuBi => "ngayVaoDangDuBi",
    NgayVaoDangChinhThuc => "ngayVaoDangChinhThuc",
    NgayVaoDoan => "ngayVaoDoan",
    Sdt => "sdt",
    Email => "email",
    Facebook => "facebook",
    DiaChi => "diaChi",
    DiemHocKi1 => "diemHocKi1",
    DiemHocKi2 => "diemHocKi2",
    ThamGiaDeTaiNckh => "thamGiaDeTaiNCKH",
    ThamGiaGiaiThuongEureka => "thamGiaGiaiThuongEureka",
    ThamGiaCuocThi => "thamGiaCuocThi",
    ThamGiaYTuongSangTao => "thamGiaYTuongSangTao",
    ThamGiaClb => "thamGiaCLB",
    BaiViet => "baiViet",
    SanPhamSangTao => "sanPhamSangTao",
    ThamGiaDoiTuyen => "thamGiaDoiTuyen",
    GiaiThuongYTuong => "giaiThuongYTuong",
    RotMon => "rotMon",
    DiemRenLuyen => "diemRenLuyen",
    ThanhVienDoiThi => "thanhVienDoiThi",
    ThamLuanBaiViet => "thamLuanBaiViet",
    ThanhNienTieuBieu => "thanhNienTieuBieu",
    DanhHieuThanhNienKhoe => "danhHieuThanhNienKhoe",
    ThamGiaHoatDongTheThao => "thamGiaHoatDongTheThao",
    ThanhVienDoiTuyenTheThao => "thanhVienDoiTuyenTheThao",
    SinhVienKhuyetTat => "sinhVienKhuyetTat",
    NangLucNgoaiNgu => "nangLucNgoaiNgu",
    ChungChiTiengAnh => "chungChiTiengAnh",
    GiaiCuocThiNgoaiNgu => "giaiCuocThiNgoaiNgu",
    HoatDongGiaoLuuQuocTe => "hoatDongGiaoLuuQuocTe",
    KyNangThucHanhXaHoi => "kyNangThucHanhXaHoi",
    HoiThaoGiaoLuuDoanhNghiep => "hoiThaoGiaoLuuDoanhNghiep",
    ChungNhanKyNang => "chungNhanKyNang",
    ThanhVienClb => "thanhVienCLB",
    BanChapHanh => "banChapHanh",
    HoatDongDongDien => "hoatDongDongDien",
    CuocThiKyNang => "cuocThiKyNang",
    KhenThuongDoanHoi => "khenThuongDoanHoi",
    ChienDichTinhNguyen => "chienDichTinhNguyen",
    DiemCtxh => "diemCTXH",
    KhenThuongTinhNguyen => "khenThuongTinhNguyen",
    HoatDongHoTroCongDong => "hoatDongHoTroCongDong",
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub const NGANH_OPTIONS: &[(&str, &str)] = &[
    ("CNTT", "Công nghệ thông tin"),
    ("KTDL", "Khoa học dữ liệu"),
    ("ATTT", "An toàn thông tin"),
];

pub const GIOI_TINH_OPTIONS: &[(&str, &str)] = &[("Nam", "Nam"), ("Nữ", "Nữ"), ("Khác", "Khác")];

/// Widget used to render a field.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum FieldInput {
    Text,
    Email,
    Tel,
    Date,
    Number,
    TextArea,
    Select(&'static [(&'static str, &'static str)]),
}

/// Constraint applied to the trimmed value of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Optional,
    Required,
    MinChars(usize, &'static str),
    Email(&'static str),
    OneOf(&'static [(&'static str, &'static str)], &'static str),
    NonNegativeNumber,
}

impl Rule {
    pub fn check(&self, raw: &str) -> Result<(), &'static str> {
        let value = raw.trim();
        match *self {
            Rule::Optional => Ok(()),
            Rule::Required if value.is_empty() => Err(REQUIRED_MESSAGE),
            Rule::Required => Ok(()),
            Rule::MinChars(min, message) if value.chars().count() < min => Err(message),
            Rule::MinChars(..) => Ok(()),
            Rule::Email(message) if !value.validate_email() => Err(message),
            Rule::Email(_) => Ok(()),
            Rule::OneOf(options, message) => {
                if options.iter().any(|(v, _)| *v == value) {
                    Ok(())
                } else {
                    Err(message)
                }
            }
            Rule::NonNegativeNumber => match parse_number(value) {
                None => Err(NOT_A_NUMBER_MESSAGE),
                Some(n) if n < 0.0 => Err(NEGATIVE_NUMBER_MESSAGE),
                Some(_) => Ok(()),
            },
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Rule::Optional)
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Static description of one form field.
#[derive(Debug, Serialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input: FieldInput,
    #[serde(skip)]
    pub rule: Rule,
}

/// One wizard step and the fields it owns.
#[derive(Debug, Serialize)]
pub struct StepSpec {
    pub title: &'static str,
    pub heading: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn field(
    key: FieldKey,
    label: &'static str,
    placeholder: &'static str,
    input: FieldInput,
    rule: Rule,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        placeholder,
        input,
        rule,
    }
}

const fn answer(key: FieldKey, label: &'static str, placeholder: &'static str) -> FieldSpec {
    field(key, label, placeholder, FieldInput::TextArea, Rule::Required)
}

const NONE_IF_EMPTY: &str = "Nếu không có, xin để trống";

pub static STEPS: [StepSpec; 6] = [
    StepSpec {
        title: "Thông tin cá nhân",
        heading: "THÔNG TIN CÁ NHÂN",
        fields: &[
            field(
                FieldKey::HoTen,
                "1. Họ tên",
                "Nhập họ tên",
                FieldInput::Text,
                Rule::MinChars(2, "Họ tên phải có ít nhất 2 ký tự"),
            ),
            field(
                FieldKey::Mssv,
                "2. MSSV",
                "Nhập MSSV",
                FieldInput::Text,
                Rule::MinChars(7, "MSSV không hợp lệ"),
            ),
            field(
                FieldKey::Khoa,
                "3. Khoa",
                "Nhập khoa",
                FieldInput::Text,
                Rule::MinChars(2, "Vui lòng nhập khoa"),
            ),
            field(
                FieldKey::Nganh,
                "4. Ngành",
                "Chọn ngành",
                FieldInput::Select(NGANH_OPTIONS),
                Rule::OneOf(NGANH_OPTIONS, "Vui lòng chọn ngành"),
            ),
            field(
                FieldKey::Lop,
                "5. Lớp",
                "Nhập lớp",
                FieldInput::Text,
                Rule::MinChars(2, "Vui lòng nhập lớp"),
            ),
            field(
                FieldKey::GioiTinh,
                "6. Giới tính",
                "Chọn giới tính",
                FieldInput::Select(GIOI_TINH_OPTIONS),
                Rule::OneOf(GIOI_TINH_OPTIONS, "Vui lòng chọn giới tính"),
            ),
            field(
                FieldKey::NgaySinh,
                "7. Ngày sinh",
                "Chọn ngày sinh",
                FieldInput::Date,
                Rule::Required,
            ),
            field(
                FieldKey::DanToc,
                "8. Dân tộc",
                "Nhập dân tộc",
                FieldInput::Text,
                Rule::Required,
            ),
            field(
                FieldKey::NgayVaoDangDuBi,
                "9. Ngày vào Đảng (dự bị)",
                NONE_IF_EMPTY,
                FieldInput::Date,
                Rule::Optional,
            ),
            field(
                FieldKey::NgayVaoDangChinhThuc,
                "10. Ngày vào Đảng (chính thức)",
                NONE_IF_EMPTY,
                FieldInput::Date,
                Rule::Optional,
            ),
            field(
                FieldKey::NgayVaoDoan,
                "11. Ngày vào Đoàn",
                NONE_IF_EMPTY,
                FieldInput::Date,
                Rule::Optional,
            ),
            field(
                FieldKey::Sdt,
                "12. Số điện thoại",
                "Nhập số điện thoại",
                FieldInput::Tel,
                Rule::MinChars(10, "Số điện thoại không hợp lệ"),
            ),
            field(
                FieldKey::Email,
                "13. Email",
                "Nhập email",
                FieldInput::Email,
                Rule::Email("Email không hợp lệ"),
            ),
            field(
                FieldKey::Facebook,
                "14. Facebook",
                "Nhập link Facebook",
                FieldInput::Text,
                Rule::Optional,
            ),
            field(
                FieldKey::DiaChi,
                "15. Địa chỉ liên lạc",
                "Nhập địa chỉ liên lạc",
                FieldInput::Text,
                Rule::MinChars(5, "Vui lòng nhập địa chỉ liên lạc"),
            ),
        ],
    },
    StepSpec {
        title: "Học tập tốt",
        heading: "TIÊU CHUẨN \"HỌC TẬP TỐT\"",
        fields: &[
            field(
                FieldKey::DiemHocKi1,
                "1. Điểm học tập Học kì I năm học 2024 - 2025",
                "Nhập điểm học kỳ 1",
                FieldInput::Number,
                Rule::Required,
            ),
            field(
                FieldKey::DiemHocKi2,
                "2. Điểm học tập Học kì II năm học 2024 - 2025",
                "Nhập điểm học kỳ 2",
                FieldInput::Number,
                Rule::Required,
            ),
            answer(
                FieldKey::ThamGiaDeTaiNckh,
                "3. Bạn có tham gia đề tài Nghiên cứu Khoa học (NCKH) các cấp với tư cách là thành viên nghiên cứu đề tài nào chưa?",
                "Nếu có, vui lòng ghi rõ tên đề tài, cấp nghiên cứu, vai trò của bạn. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaGiaiThuongEureka,
                "4. Bạn có tham gia Giải thưởng sinh viên nghiên cứu khoa học Euréka từ cấp Trường trở lên nào chưa?",
                "Nếu có, vui lòng ghi rõ tên giải thưởng, cấp tổ chức, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaCuocThi,
                "5. Bạn có tham gia dự thi hoặc tổ chức ít nhất 01 cuộc thi học thuật, sáng tạo, NCKH các cấp (từ cấp Liên Chi Hội trở lên và tương đương) chưa?",
                "Nếu có, vui lòng ghi rõ tên cuộc thi, cấp tổ chức, thời gian, vai trò của bạn. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaYTuongSangTao,
                "6. Bạn có tham gia dự thi hoặc tổ chức cuộc thi \"Ý tưởng sáng tạo sinh viên toàn thành\" hoặc các cuộc thi, hoạt động về khác Ý tưởng sáng tạo từ cấp Trường trở lên?",
                "Nếu có, vui lòng ghi rõ tên cuộc thi, cấp tổ chức, thời gian, vai trò của bạn. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaClb,
                "7. Bạn có tham gia sinh hoạt định kỳ tại các Câu lạc bộ (CLB) học thuật, Nghiên cứu Khoa học (NCKH) từ cấp Liên Chi Hội trở lên và tương đương?",
                "Nếu có, vui lòng ghi rõ tên CLB, thời gian tham gia. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::BaiViet,
                "8. Bạn có bài viết đăng trên tạp chí chuyên ngành hoặc có bài tham luận tham gia các hội thảo khoa học chuyên ngành (được bảo trợ nội dung bởi các cơ quan chuyên môn) từ cấp trường trở lên không?",
                "Nếu có, vui lòng ghi rõ tên bài viết, tên tạp chí/hội thảo, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::SanPhamSangTao,
                "9. Bạn có sản phẩm sáng tạo được cấp bằng sáng chế, cấp giấy phép xuất bản hoặc được các giải thưởng từ cấp tỉnh/ thành trực thuộc Trung ương trở lên?",
                "Nếu có, vui lòng ghi rõ tên sản phẩm, loại giấy phép/giải thưởng, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaDoiTuyen,
                "10. Bạn là thành viên các đội tuyển tham gia các kỳ thi học thuật cấp quốc gia, quốc tế?",
                "Nếu có, vui lòng ghi rõ tên đội tuyển, kỳ thi tham gia, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::GiaiThuongYTuong,
                "11. Bạn có đạt giải thưởng trong các cuộc thi ý tưởng sáng tạo từ cấp trường trở lên không?",
                "Nếu có, vui lòng ghi rõ tên giải thưởng, cuộc thi, cấp tổ chức, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::RotMon,
                "12. Bạn có rớt môn trong năm học 2024 - 2025 không?",
                "Nếu có, vui lòng ghi rõ tên môn học, học kỳ. Nếu không, vui lòng ghi 'Không'.",
            ),
        ],
    },
    StepSpec {
        title: "Đạo đức tốt",
        heading: "TIÊU CHUẨN \"ĐẠO ĐỨC TỐT\"",
        fields: &[
            field(
                FieldKey::DiemRenLuyen,
                "1. Điểm rèn luyện: Điểm rèn luyện trung bình của năm học",
                "Nhập điểm rèn luyện",
                FieldInput::Number,
                Rule::Required,
            ),
            answer(
                FieldKey::ThanhVienDoiThi,
                "2.1. Là thành viên chính thức của đội thi tìm hiểu về chủ nghĩa Mác - Lênin, tư tưởng Hồ Chí Minh từ cấp Trường trở lên",
                "Nếu có, vui lòng ghi rõ tên đội thi, cấp tổ chức, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamLuanBaiViet,
                "2.2. Có tham luận, bài viết được trình bày tại các diễn đàn học thuật về các môn khoa học Mác - Lênin, tư tưởng Hồ Chí Minh từ cấp Trường trở lên",
                "Ghi rõ tên tham luận, diễn đàn nào, cấp tổ chức, thời gian tổ chức. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThanhNienTieuBieu,
                "2.3. Là thanh niên/ sinh viên tiêu biểu trong các lĩnh vực, thanh niên tiên tiến làm theo lời Bác, gương người tốt, việc tốt, có hành động dũng cảm cứu người được các cấp ghi nhận, biểu dương, khen thưởng hoặc nêu gương qua các phương tiện thông tin đại chúng",
                "Ghi rõ danh hiệu, cấp tổ chức và thời gian tuyên dương hoặc đường dẫn đến phương tiện thông tin đại chúng đăng bài biểu dương. Nếu không, vui lòng ghi 'Không'.",
            ),
        ],
    },
    StepSpec {
        title: "Thể lực tốt",
        heading: "TIÊU CHUẨN \"THỂ LỰC TỐT\"",
        fields: &[
            answer(
                FieldKey::DanhHieuThanhNienKhoe,
                "3.1. Đạt danh hiệu \"Thanh niên khỏe\" trong năm học 2022 - 2023",
                "Ghi rõ thời gian nhận chứng nhận. Nếu không có, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThamGiaHoatDongTheThao,
                "3.2. Tham gia các hoạt động thể dục thể thao, giải chạy, hội thao sinh viên (trừ thể thao điện tử) từ cấp Trường trở lên và đạt giấy chứng nhận",
                "Ghi rõ thời gian nhận chứng nhận. Nếu không có, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThanhVienDoiTuyenTheThao,
                "3.3. Là thành viên đội tuyển cấp trường, thành phố các môn thể dục thể thao",
                "Nếu có, vui lòng ghi rõ tên đội tuyển, cấp đội tuyển, thời gian tham gia. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::SinhVienKhuyetTat,
                "3.4. Đối với những sinh viên khuyết tật có giấy xác nhận được miễn tiêu chuẩn này",
                "Nếu có, vui lòng ghi rõ thông tin giấy xác nhận. Nếu không, vui lòng ghi 'Không'.",
            ),
        ],
    },
    StepSpec {
        title: "Hội nhập tốt",
        heading: "TIÊU CHUẨN \"HỘI NHẬP TỐT\"",
        fields: &[
            answer(
                FieldKey::NangLucNgoaiNgu,
                "1. Năng lực ngoại ngữ của bạn như thế nào?",
                "Mô tả khả năng ngoại ngữ của bạn (ngôn ngữ, trình độ, khả năng giao tiếp...)",
            ),
            answer(
                FieldKey::ChungChiTiengAnh,
                "2. Bạn có chứng chỉ tiếng Anh hoặc ngoại ngữ khác không?",
                "Nếu có, vui lòng ghi rõ tên chứng chỉ, điểm số, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::GiaiCuocThiNgoaiNgu,
                "3. Bạn có đạt giải trong các cuộc thi về ngoại ngữ không?",
                "Nếu có, vui lòng ghi rõ tên cuộc thi, giải thưởng, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::HoatDongGiaoLuuQuocTe,
                "4. Bạn có tham gia các hoạt động giao lưu quốc tế không?",
                "Nếu có, vui lòng ghi rõ tên hoạt động, thời gian, vai trò. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::KyNangThucHanhXaHoi,
                "5. Bạn có tham gia các lớp kỹ năng thực hành xã hội không?",
                "Nếu có, vui lòng ghi rõ tên lớp, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::HoiThaoGiaoLuuDoanhNghiep,
                "6. Bạn có tham gia các hội thảo, giao lưu với doanh nghiệp không?",
                "Nếu có, vui lòng ghi rõ tên hội thảo, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ChungNhanKyNang,
                "7. Bạn có chứng nhận về kỹ năng không?",
                "Nếu có, vui lòng ghi rõ tên chứng nhận, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::ThanhVienClb,
                "8. Bạn có là thành viên của CLB, đội, nhóm không?",
                "Nếu có, vui lòng ghi rõ tên CLB, thời gian tham gia. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::BanChapHanh,
                "9. Bạn có là thành viên Ban Chấp hành Đoàn - Hội các cấp không?",
                "Nếu có, vui lòng ghi rõ chức vụ, nhiệm kỳ. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::HoatDongDongDien,
                "10. Bạn có tham gia các hoạt động văn nghệ, đồng diễn không?",
                "Nếu có, vui lòng ghi rõ tên hoạt động, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::CuocThiKyNang,
                "11. Bạn có tham gia các cuộc thi về kỹ năng không?",
                "Nếu có, vui lòng ghi rõ tên cuộc thi, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
            answer(
                FieldKey::KhenThuongDoanHoi,
                "12. Bạn có được khen thưởng trong công tác Đoàn - Hội không?",
                "Nếu có, vui lòng ghi rõ hình thức khen thưởng, thời gian. Nếu không, vui lòng ghi 'Không'.",
            ),
        ],
    },
    StepSpec {
        title: "Tình nguyện tốt",
        heading: "TIÊU CHUẨN \"TÌNH NGUYỆN TỐT\"",
        fields: &[
            answer(
                FieldKey::ChienDichTinhNguyen,
                "4.1. Tham gia và nhận giấy chứng nhận hoàn thành đầy đủ một trong các chương trình, chiến dịch sau: Chiến dịch Xuân tình nguyện 2023, Chương trình Tiếp sức mùa thi 2023 và Chiến dịch Mùa hè xanh 2023",
                "VD: Tham gia chiến dịch 'Xuân tình nguyện 2023' khoa Công nghệ Thông tin.",
            ),
            field(
                FieldKey::DiemCtxh,
                "4.2. Tham gia và đạt được ít nhất 25 điểm công tác xã hội/ năm học",
                "VD: 30.0",
                FieldInput::Number,
                Rule::NonNegativeNumber,
            ),
            answer(
                FieldKey::KhenThuongTinhNguyen,
                "4.3. Được khen thưởng từ cấp khoa trở lên về hoạt động tình nguyện",
                "VD: Không.",
            ),
            answer(
                FieldKey::HoatDongHoTroCongDong,
                "4.4. Tham gia và đạt giấy chứng nhận tham gia các hoạt động hỗ trợ cộng đồng tại khu địa bàn dân cư hoặc tại địa phương nơi sinh viên học tập và sinh hoạt",
                "Nếu có, vui lòng ghi rõ thông tin. Nếu không, vui lòng ghi 'Không'.",
            ),
        ],
    },
];

/// Looks up the schema entry of a field.
pub fn field_spec(key: FieldKey) -> Option<&'static FieldSpec> {
    STEPS
        .iter()
        .flat_map(|step| step.fields.iter())
        .find(|spec| spec.key == key)
}

/// Index of the step owning a field.
pub fn step_of(key: FieldKey) -> Option<usize> {
    STEPS
        .iter()
        .position(|step| step.fields.iter().any(|spec| spec.key == key))
}

/// Field-level validation messages keyed by field.
pub type FieldErrors = BTreeMap<FieldKey, &'static str>;

/// The full registration record as entered so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationForm {
    values: BTreeMap<FieldKey, String>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        let mut values: BTreeMap<FieldKey, String> = FieldKey::ALL
            .iter()
            .map(|key| (*key, String::new()))
            .collect();
        values.insert(FieldKey::Nganh, "CNTT".to_string());
        values.insert(FieldKey::GioiTinh, "Nam".to_string());
        values.insert(FieldKey::DiemCtxh, "0".to_string());
        Self { values }
    }
}

impl RegistrationForm {
    pub fn get(&self, key: FieldKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// Stores a raw answer, keeping at most [`MAX_ANSWER_CHARS`] characters.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let mut value = value.into();
        if let Some((idx, _)) = value.char_indices().nth(MAX_ANSWER_CHARS) {
            value.truncate(idx);
        }
        self.values.insert(key, value);
    }

    /// Applies posted name/value pairs, ignoring names that are not fields.
    pub fn apply<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            if let Some(key) = FieldKey::from_name(name) {
                self.set(key, value);
            }
        }
    }

    pub fn values(&self) -> &BTreeMap<FieldKey, String> {
        &self.values
    }

    /// Validates the given fields and returns the messages of those that fail.
    pub fn validate_fields<'a, I>(&self, specs: I) -> FieldErrors
    where
        I: IntoIterator<Item = &'a FieldSpec>,
    {
        specs
            .into_iter()
            .filter_map(|spec| {
                spec.rule
                    .check(self.get(spec.key))
                    .err()
                    .map(|message| (spec.key, message))
            })
            .collect()
    }

    pub fn validate_step(&self, step: usize) -> FieldErrors {
        match STEPS.get(step) {
            Some(spec) => self.validate_fields(spec.fields),
            None => FieldErrors::new(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        self.validate_fields(STEPS.iter().flat_map(|step| step.fields.iter()))
    }

    /// Builds the relayed JSON record.
    ///
    /// Values are trimmed, blank optional answers are left out and the social
    /// work score is sent as a number.
    pub fn to_payload(&self) -> Result<RegistrationPayload, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut record = Map::new();
        for spec in STEPS.iter().flat_map(|step| step.fields.iter()) {
            let value = self.get(spec.key).trim();
            if spec.rule.is_optional() && value.is_empty() {
                continue;
            }
            let json = match spec.rule {
                Rule::NonNegativeNumber => parse_number(value)
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| FieldErrors::from([(spec.key, NOT_A_NUMBER_MESSAGE)]))?,
                _ => Value::String(value.to_string()),
            };
            record.insert(spec.key.name().to_string(), json);
        }
        Ok(RegistrationPayload(record))
    }
}

/// Validated registration record ready to be relayed.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(transparent)]
pub struct RegistrationPayload(Map<String, Value>);

impl RegistrationPayload {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A form that passes every rule.
    pub(crate) fn valid_form() -> RegistrationForm {
        let mut form = RegistrationForm::default();
        for key in FieldKey::ALL {
            let value = match key {
                FieldKey::HoTen => "Nguyen Van A",
                FieldKey::Mssv => "21110001",
                FieldKey::Khoa => "CNTT",
                FieldKey::Lop => "21110CL1",
                FieldKey::NgaySinh => "2003-01-01",
                FieldKey::DanToc => "Kinh",
                FieldKey::Sdt => "0912345678",
                FieldKey::Email => "a@example.com",
                FieldKey::DiaChi => "1 Vo Van Ngan, Thu Duc",
                FieldKey::DiemHocKi1 | FieldKey::DiemHocKi2 => "8.5",
                FieldKey::DiemRenLuyen => "90",
                FieldKey::DiemCtxh => "30.5",
                FieldKey::Nganh
                | FieldKey::GioiTinh
                | FieldKey::NgayVaoDangDuBi
                | FieldKey::NgayVaoDangChinhThuc
                | FieldKey::NgayVaoDoan
                | FieldKey::Facebook => continue,
                _ => "Không",
            };
            form.set(*key, value);
        }
        form
    }

    #[test]
    fn schema_covers_every_field_once() {
        let counts: Vec<usize> = STEPS.iter().map(|s| s.fields.len()).collect();
        assert_eq!(counts, vec![15, 12, 4, 4, 12, 4]);
        assert_eq!(FieldKey::ALL.len(), 51);
        for key in FieldKey::ALL {
            let owners = STEPS
                .iter()
                .filter(|s| s.fields.iter().any(|f| f.key == *key))
                .count();
            assert_eq!(owners, 1, "{} must belong to exactly one step", key.name());
        }
    }

    #[test]
    fn names_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_name(key.name()), Some(*key));
        }
        assert_eq!(FieldKey::from_name("step"), None);
        assert_eq!(step_of(FieldKey::DiemCtxh), Some(5));
    }

    #[test]
    fn defaults_preselect_choices() {
        let form = RegistrationForm::default();
        assert_eq!(form.get(FieldKey::Nganh), "CNTT");
        assert_eq!(form.get(FieldKey::GioiTinh), "Nam");
        assert_eq!(form.get(FieldKey::DiemCtxh), "0");
        assert_eq!(form.get(FieldKey::HoTen), "");
    }

    #[test]
    fn social_work_score_must_be_non_negative_number() {
        let rule = field_spec(FieldKey::DiemCtxh).unwrap().rule;
        assert_eq!(rule.check("-5"), Err(NEGATIVE_NUMBER_MESSAGE));
        assert_eq!(rule.check("0"), Ok(()));
        assert_eq!(rule.check("30.5"), Ok(()));
        assert_eq!(rule.check(" 12 "), Ok(()));
        assert_eq!(rule.check("abc"), Err(NOT_A_NUMBER_MESSAGE));
        assert_eq!(rule.check(""), Err(NOT_A_NUMBER_MESSAGE));
        assert_eq!(rule.check("NaN"), Err(NOT_A_NUMBER_MESSAGE));
    }

    #[test]
    fn gender_accepts_exactly_three_values() {
        let rule = field_spec(FieldKey::GioiTinh).unwrap().rule;
        for ok in ["Nam", "Nữ", "Khác"] {
            assert_eq!(rule.check(ok), Ok(()));
        }
        for bad in ["", "nam", "Nu", "Other"] {
            assert_eq!(rule.check(bad), Err("Vui lòng chọn giới tính"));
        }
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        let rule = field_spec(FieldKey::HoTen).unwrap().rule;
        assert_eq!(rule.check("  A  "), Err("Họ tên phải có ít nhất 2 ký tự"));
        assert_eq!(rule.check(" An "), Ok(()));
        let rule = field_spec(FieldKey::RotMon).unwrap().rule;
        assert_eq!(rule.check("   "), Err(REQUIRED_MESSAGE));
    }

    #[test]
    fn answers_are_capped() {
        let mut form = RegistrationForm::default();
        form.set(FieldKey::RotMon, "ô".repeat(MAX_ANSWER_CHARS + 10));
        assert_eq!(form.get(FieldKey::RotMon).chars().count(), MAX_ANSWER_CHARS);
    }

    #[test]
    fn step_validation_only_reports_its_fields() {
        let mut form = valid_form();
        form.set(FieldKey::Email, "nope");
        form.set(FieldKey::RotMon, "");
        let errors = form.validate_step(0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FieldKey::Email), Some(&"Email không hợp lệ"));
        assert_eq!(form.validate().len(), 2);
    }

    #[test]
    fn payload_omits_blank_optionals_and_types_score() {
        let mut form = valid_form();
        form.set(FieldKey::Facebook, "  https://fb.com/a ");
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.len(), 48);
        assert_eq!(payload.get("facebook"), Some(&Value::from("https://fb.com/a")));
        assert_eq!(payload.get("ngayVaoDoan"), None);
        assert_eq!(payload.get("diemCTXH"), Some(&serde_json::json!(30.5)));
        assert_eq!(payload.get("hoTen"), Some(&Value::from("Nguyen Van A")));
    }

    #[test]
    fn invalid_form_has_no_payload() {
        let errors = RegistrationForm::default().to_payload().unwrap_err();
        assert!(errors.contains_key(&FieldKey::HoTen));
        assert!(!errors.contains_key(&FieldKey::Nganh));
    }
}
