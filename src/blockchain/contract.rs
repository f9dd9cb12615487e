use ethers::prelude::*;

// ABI for CollegeBlockChain contract. Tuple components are positional on the
// wire, so the struct field names only shape the generated Rust type.
abigen!(
    CollegeBlockChain,
    r#"[
        struct DepartmentBlock { string department; string student_name; string usn; string dob; string semester; string cgpa; address student_address; }
        function createGenesisBlock(string _department, string _studentName, string _usn, string _dob, string _semester, string _cgpa, address _studentAddress) external
        function addBlock(string _department, string _studentName, string _usn, string _dob, string _semester, string _cgpa, address _studentAddress) external
        function getDepartmentBlocks(string _department) external view returns (DepartmentBlock[])
    ]"#
);
