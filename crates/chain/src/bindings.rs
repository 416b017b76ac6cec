//! Contract interfaces of the Aragon APM deployment, limited to the
//! functions and events the deployer touches.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface APMRegistry {
        function registrar() external view returns (address);
        function kernel() external view returns (address);
        function CREATE_REPO_ROLE() external view returns (bytes32);
    }

    #[sol(rpc)]
    interface ENSSubdomainRegistrar {
        function ens() external view returns (address);
        function rootNode() external view returns (bytes32);
        function CREATE_NAME_ROLE() external view returns (bytes32);
        function createName(bytes32 _label, address _owner) external returns (bytes32 node);
    }

    #[sol(rpc)]
    interface ENS {
        function owner(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface Kernel {
        function acl() external view returns (address);
    }

    #[sol(rpc)]
    interface ACL {
        function ANY_ENTITY() external view returns (address);
        function createPermission(address _entity, address _app, bytes32 _role, address _manager) external;
        function grantPermission(address _entity, address _app, bytes32 _role) external;
        function hasPermission(address _who, address _where, bytes32 _what) external view returns (bool);
        function getPermissionManager(address _app, bytes32 _role) external view returns (address);
    }

    #[sol(rpc)]
    interface APMRegistryFactory {
        event DeployAPM(bytes32 indexed node, address apm);
        function newAPM(bytes32 _tld, bytes32 _label, address _root) external returns (address);
    }
}
